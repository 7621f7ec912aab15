//! Stateful session over a [`DavClient`]: a virtual current working
//! directory plus the navigation and file operations the shell exposes.

use tracing::debug;

use crate::client::{DavClient, DavResponse};
use crate::error::DavError;
use crate::models::{Depth, Resource};
use crate::path::{resolve, resolve_file};

/// Async WebDAV session.
///
/// Owns the virtual cwd; only a `cd` mutates it. The cwd is not validated
/// against the server: `cd` performs no round trip, so changing into a
/// nonexistent directory succeeds and later operations fail with the
/// server's status. Every operation that does reach the server checks the
/// response and converts a non-success status into [`DavError::Status`];
/// that check is the façade's single error chokepoint.
///
/// Not meant for concurrent navigation: callers needing that serialize `cd`
/// or use independent sessions.
#[derive(Debug)]
pub struct Session {
    client: DavClient,
    cwd: String,
}

impl Session {
    pub fn new(client: DavClient) -> Self {
        Self {
            client,
            cwd: "/".to_string(),
        }
    }

    /// The current virtual working directory, always in normalized
    /// `/`-wrapped form.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Access to the underlying protocol client for raw requests.
    pub fn client(&self) -> &DavClient {
        &self.client
    }

    /// Lists the entries of a directory (depth 1), excluding the directory
    /// itself. `""` or `"."` list the cwd.
    pub async fn ls(&self, path: &str) -> Result<Vec<Resource>, DavError> {
        let path = resolve(&self.cwd, path);
        let response = self.client.propfind(&path, Depth::One, None).await?;
        response.raise_for_status()?;
        let mut resources = response.resources()?;
        if !resources.is_empty() {
            // the first entry is the directory itself, not a child
            resources.remove(0);
        }
        Ok(resources)
    }

    /// Changes the virtual working directory. Infallible: no request is
    /// made, so nonexistent paths are accepted.
    pub fn cd(&mut self, target: &str) {
        self.cwd = resolve(&self.cwd, target);
        debug!("cwd is now {}", self.cwd);
    }

    /// Creates a directory.
    pub async fn mkdir(&self, name: &str) -> Result<(), DavError> {
        let path = resolve(&self.cwd, name);
        self.checked(self.client.mkcol(&path).await?)
    }

    /// Uploads `content` to the destination path.
    pub async fn upload(&self, dest: &str, content: &[u8]) -> Result<(), DavError> {
        let path = resolve_file(&self.cwd, dest);
        self.checked(self.client.put(&path, content.to_vec()).await?)
    }

    /// Downloads the file at `src` and returns its bytes. Writing them
    /// anywhere is the caller's concern.
    pub async fn download(&self, src: &str) -> Result<Vec<u8>, DavError> {
        let path = resolve_file(&self.cwd, src);
        let response = self.client.get(&path).await?;
        response.raise_for_status()?;
        Ok(response.into_body())
    }

    /// Moves a file from `src` to `target`. A target naming a directory
    /// receives the source's base name; a target naming a file is a rename.
    pub async fn mv(&self, src: &str, target: &str) -> Result<(), DavError> {
        let src = resolve_file(&self.cwd, src);
        let target = resolve_file(&self.cwd, target);
        self.checked(self.client.mv(&src, &target).await?)
    }

    /// Copies a file from `src` to `target`. Target handling matches
    /// [`Session::mv`].
    pub async fn cp(&self, src: &str, target: &str) -> Result<(), DavError> {
        let src = resolve_file(&self.cwd, src);
        let target = resolve_file(&self.cwd, target);
        self.checked(self.client.cp(&src, &target).await?)
    }

    /// Deletes the file or directory at `path`.
    pub async fn rm(&self, path: &str) -> Result<(), DavError> {
        let path = resolve_file(&self.cwd, path);
        self.checked(self.client.delete(&path).await?)
    }

    fn checked(&self, response: DavResponse) -> Result<(), DavError> {
        response.raise_for_status()
    }
}
