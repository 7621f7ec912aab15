//! Shared protocol types: resources parsed out of multi-status documents,
//! request methods and the PROPFIND depth header.

use std::fmt;
use std::str::FromStr;

use crate::error::DavError;
use crate::path;

/// What a multi-status `response` entry describes.
///
/// File-only properties live in the `File` payload so a collection can never
/// carry a size or content type by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Collection,
    File { size: u64, content_type: String },
}

/// One entry of a multi-status listing, immutable once parsed.
///
/// All fields default to empty strings (or `0` for the file size) when the
/// server omits the corresponding property; missing properties are never an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Server path of the resource, as reported in `href`.
    pub href: String,
    pub kind: ResourceKind,
    /// Raw `getlastmodified` value.
    pub last_modified: String,
    /// Raw `getetag` value.
    pub etag: String,
    /// Raw HTTP status line from the multi-status block.
    pub status: String,
}

impl Resource {
    /// The name of the resource, excluding the rest of its path.
    pub fn basename(&self) -> &str {
        path::basename(&self.href)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.kind, ResourceKind::Collection)
    }
}

/// Supported WebDAV request methods, plus a validated free-form fallback.
///
/// Parsing is case-insensitive and normalizes to the canonical uppercase
/// form before transport. Unknown but syntactically valid HTTP tokens are
/// accepted as [`Method::Other`]; anything else is a [`DavError::Method`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Propfind,
    Get,
    Put,
    Delete,
    Mkcol,
    Head,
    Post,
    Move,
    Copy,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Propfind => "PROPFIND",
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Mkcol => "MKCOL",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Move => "MOVE",
            Method::Copy => "COPY",
            Method::Other(name) => name,
        }
    }

    pub(crate) fn to_http(&self) -> Result<reqwest::Method, DavError> {
        reqwest::Method::from_bytes(self.as_str().as_bytes())
            .map_err(|_| DavError::Method(self.as_str().to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = DavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let method = match normalized.as_str() {
            "PROPFIND" => Method::Propfind,
            "GET" => Method::Get,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "MKCOL" => Method::Mkcol,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "MOVE" => Method::Move,
            "COPY" => Method::Copy,
            _ => {
                let is_token = !normalized.is_empty()
                    && normalized
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
                if !is_token {
                    return Err(DavError::Method(s.to_string()));
                }
                Method::Other(normalized)
            }
        };
        Ok(method)
    }
}

/// Value of the `Depth` header on PROPFIND requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// The resource itself only.
    Zero,
    /// The resource and its direct children.
    One,
    /// The full subtree.
    Infinity,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
            Depth::One => "1",
            Depth::Infinity => "infinity",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
