//! Virtual path resolution for the shell's `cd`/`ls` navigation.
//!
//! Paths handled here are server-side virtual paths, never local filesystem
//! paths. A resolved directory path always starts and ends with `/` and
//! contains no `.`, `..` or empty segments; the root is exactly `/`.

/// Computes the normalized absolute directory path reached from `cwd` by
/// following `target`.
///
/// `target` may be absolute (`/a/b`), relative (`a/b`), or start with `.` or
/// one or more `..` segments. `..` at the root is a no-op; it is impossible
/// to navigate above `/`. Only leading `.`/`..` segments are special, which
/// matches the shell's navigation grammar.
pub fn resolve(cwd: &str, target: &str) -> String {
    let target = target.trim();
    let mut cwd_parts: Vec<&str> = cwd.split('/').filter(|p| !p.is_empty()).collect();
    let mut dest_parts: Vec<&str> = target.split('/').filter(|p| !p.is_empty()).collect();

    if dest_parts.first() == Some(&".") {
        dest_parts.remove(0);
    }
    if dest_parts.is_empty() {
        // `/` (or `/.`) names the root; a relative empty target stays put
        return if target.starts_with('/') {
            "/".to_string()
        } else {
            cwd.to_string()
        };
    }

    let resolved = if dest_parts[0] == ".." {
        while let Some(&"..") = dest_parts.first() {
            cwd_parts.pop();
            dest_parts.remove(0);
        }
        cwd_parts.append(&mut dest_parts);
        format!("/{}/", cwd_parts.join("/"))
    } else if target.starts_with('/') {
        format!("/{}/", dest_parts.join("/"))
    } else {
        // cwd is already `/`-terminated
        format!("{}{}/", cwd, dest_parts.join("/"))
    };

    if resolved.trim_matches('/').is_empty() {
        "/".to_string()
    } else {
        resolved
    }
}

/// Like [`resolve`], but without the trailing slash, for addressing files.
///
/// The root cannot name a file and stays `/`.
pub fn resolve_file(cwd: &str, target: &str) -> String {
    let resolved = resolve(cwd, target);
    if resolved == "/" {
        resolved
    } else {
        resolved.trim_end_matches('/').to_string()
    }
}

/// Returns the final non-empty segment of a path, or `""` for the root.
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_literal_cases() {
        let cases = [
            (("/", "/"), "/"),
            // absolute target discards the cwd entirely
            (("/", "/a/b"), "/a/b/"),
            (("/a/b/", "c/d"), "/a/b/c/d/"),
            // move one directory up
            (("/a/", ".."), "/"),
            // `..` at the root is a no-op
            (("/", ".."), "/"),
            (("/", "./test"), "/test/"),
        ];
        for ((cwd, target), expected) in cases {
            assert_eq!(resolve(cwd, target), expected, "resolve({cwd:?}, {target:?})");
        }
    }

    #[test]
    fn test_resolve_dot_is_identity() {
        for (cwd, target) in [("/", "/"), ("/", "/a/b"), ("/a/b/", "c/d"), ("/a/", "..")] {
            let resolved = resolve(cwd, target);
            assert_eq!(resolve(&resolved, "."), resolved);
        }
    }

    #[test]
    fn test_resolve_empty_target_returns_cwd() {
        assert_eq!(resolve("/a/b/", ""), "/a/b/");
        assert_eq!(resolve("/a/b/", "   "), "/a/b/");
        assert_eq!(resolve("/a/b/", "."), "/a/b/");
    }

    #[test]
    fn test_resolve_root_target_from_anywhere() {
        assert_eq!(resolve("/a/b/", "/"), "/");
        assert_eq!(resolve("/a/", "/."), "/");
        assert_eq!(resolve("/", "/"), "/");
    }

    #[test]
    fn test_resolve_multiple_parent_segments() {
        assert_eq!(resolve("/a/b/c/", "../.."), "/a/");
        assert_eq!(resolve("/a/b/", "../c"), "/a/c/");
        assert_eq!(resolve("/a/", "../../../.."), "/");
    }

    #[test]
    fn test_resolve_ignores_repeated_separators() {
        assert_eq!(resolve("/", "a//b///c"), "/a/b/c/");
        assert_eq!(resolve("/", "//a/b/"), "/a/b/");
    }

    #[test]
    fn test_resolve_file_strips_trailing_slash() {
        assert_eq!(resolve_file("/a/", "notes.txt"), "/a/notes.txt");
        assert_eq!(resolve_file("/", "/a/b.pdf"), "/a/b.pdf");
        assert_eq!(resolve_file("/", ".."), "/");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/a/b/c.txt"), "c.txt");
        assert_eq!(basename("/a/b/"), "b");
        assert_eq!(basename("/"), "");
        assert_eq!(basename("file.txt"), "file.txt");
    }
}
