//! Asynchronous WebDAV protocol client.
//!
//! [`DavClient`] builds the requests (method, headers, body) and hands them
//! to `reqwest`; it never interprets HTTP statuses. A non-2xx answer comes
//! back as a normal [`DavResponse`] so callers can inspect the code;
//! translation into [`DavError::Status`] happens only through
//! [`DavResponse::raise_for_status`].

use std::borrow::Cow;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::{Auth, DavConfig};
use crate::error::DavError;
use crate::models::{Depth, Method, Resource};
use crate::multistatus::parse_multistatus;
use crate::path::basename;

/// Status code and collected byte body of one WebDAV exchange.
#[derive(Debug, Clone)]
pub struct DavResponse {
    status: StatusCode,
    body: Vec<u8>,
}

impl DavResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Translates a non-2xx/207 status into [`DavError::Status`]. 207 falls
    /// inside the 2xx success range.
    pub fn raise_for_status(&self) -> Result<(), DavError> {
        if self.status.is_success() {
            Ok(())
        } else {
            Err(DavError::Status {
                status: self.status.as_u16(),
                message: self
                    .status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            })
        }
    }

    /// Parses the body as a multi-status document.
    pub fn resources(&self) -> Result<Vec<Resource>, DavError> {
        parse_multistatus(&self.text())
    }
}

/// Async WebDAV client over a pooled `reqwest` transport.
///
/// The connection pool is acquired at construction and released when the
/// client is dropped, on error paths included. The client is cheap to clone
/// and issues one request per call; it never retries or pipelines.
#[derive(Debug, Clone)]
pub struct DavClient {
    http: Client,
    config: DavConfig,
    base_url: String,
}

impl DavClient {
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        config.validate()?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        let base_url = config.base_url();
        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs an arbitrary WebDAV request against a path below the base URL.
    ///
    /// The path is percent-encoded per segment before transmission. Caller
    /// headers are merged over the default set (`Content-Type:
    /// application/xml`), caller values winning on conflict.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<DavResponse, DavError> {
        let url = format!("{}{}", self.base_url, encode_path(path));
        self.request_url(method, &url, headers, body).await
    }

    /// Runs a request against an absolute URL taken verbatim (no
    /// re-encoding). Used by the CLI's one-shot `request` command.
    pub async fn request_url(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Vec<u8>>,
    ) -> Result<DavResponse, DavError> {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        if let Some(extra) = headers {
            merged.extend(extra);
        }

        let mut request = self.http.request(method.to_http()?, url).headers(merged);
        if let Some(Auth::Basic { username, password }) = &self.config.auth {
            request = request.basic_auth(username, Some(password));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!("{} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());

        Ok(DavResponse { status, body })
    }

    /// Runs a PROPFIND request.
    ///
    /// With an explicit property subset an XML request body is built, one
    /// empty element per property name (names are sent as given, prefix
    /// included, e.g. `d:getetag` or `oc:fileid`); without one no body is
    /// sent and the server returns all properties.
    pub async fn propfind(
        &self,
        path: &str,
        depth: Depth,
        properties: Option<&[&str]>,
    ) -> Result<DavResponse, DavError> {
        let path = ensure_trailing_slash(path);
        let mut headers = HeaderMap::new();
        headers.insert("Depth", HeaderValue::from_static(depth.as_str()));

        let body = properties
            .filter(|props| !props.is_empty())
            .map(propfind_body)
            .map(String::into_bytes);

        self.request(Method::Propfind, &path, Some(headers), body)
            .await
    }

    /// Runs a GET request.
    pub async fn get(&self, path: &str) -> Result<DavResponse, DavError> {
        self.request(Method::Get, path, None, None).await
    }

    /// Runs a PUT request with the given content.
    pub async fn put(&self, path: &str, content: Vec<u8>) -> Result<DavResponse, DavError> {
        self.request(Method::Put, path, None, Some(content)).await
    }

    /// Runs a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<DavResponse, DavError> {
        self.request(Method::Delete, path, None, None).await
    }

    /// Runs an MKCOL request. Collection paths carry a trailing slash.
    pub async fn mkcol(&self, path: &str) -> Result<DavResponse, DavError> {
        let path = ensure_trailing_slash(path);
        self.request(Method::Mkcol, &path, None, None).await
    }

    /// Runs a MOVE request from `src` to `target`.
    pub async fn mv(&self, src: &str, target: &str) -> Result<DavResponse, DavError> {
        self.move_or_copy(Method::Move, src, target).await
    }

    /// Runs a COPY request from `src` to `target`.
    pub async fn cp(&self, src: &str, target: &str) -> Result<DavResponse, DavError> {
        self.move_or_copy(Method::Copy, src, target).await
    }

    async fn move_or_copy(
        &self,
        method: Method,
        src: &str,
        target: &str,
    ) -> Result<DavResponse, DavError> {
        let mut target = target.to_string();
        if !target.starts_with('/') {
            target.insert(0, '/');
        }
        // A target naming a directory ("move into X") gets the source's base
        // name appended, the behavior WebDAV servers expect for Destination.
        if target.ends_with('/') {
            target.push_str(basename(src));
        } else if !basename(&target).contains('.') {
            target.push('/');
            target.push_str(basename(src));
        }

        let destination = format!("{}{}", self.base_url, encode_path(&target));
        let mut headers = HeaderMap::new();
        headers.insert("Destination", HeaderValue::from_str(&destination)?);
        self.request(method, src, Some(headers), None).await
    }
}

/// Percent-encodes each path segment, leaving the `/` separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn propfind_body(properties: &[&str]) -> String {
    let mut body = String::from(
        r#"<?xml version="1.0"?><d:propfind xmlns:d="DAV:" xmlns:oc="http://owncloud.org/ns"><d:prop>"#,
    );
    for property in properties {
        body.push('<');
        body.push_str(property);
        body.push_str("/>");
    }
    body.push_str("</d:prop></d:propfind>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_preserves_separators() {
        assert_eq!(encode_path("/a/b.txt"), "/a/b.txt");
        assert_eq!(encode_path("/my dir/file name.txt"), "/my%20dir/file%20name.txt");
        assert_eq!(encode_path("/übung/"), "/%C3%BCbung/");
    }

    #[test]
    fn test_propfind_body_lists_requested_properties() {
        let body = propfind_body(&["d:getetag", "oc:fileid"]);
        assert!(body.starts_with(r#"<?xml version="1.0"?><d:propfind xmlns:d="DAV:""#));
        assert!(body.contains("<d:getetag/>"));
        assert!(body.contains("<oc:fileid/>"));
        assert!(body.ends_with("</d:prop></d:propfind>"));
    }

    #[test]
    fn test_raise_for_status() {
        let ok = DavResponse {
            status: StatusCode::MULTI_STATUS,
            body: Vec::new(),
        };
        assert!(ok.raise_for_status().is_ok());

        let not_found = DavResponse {
            status: StatusCode::NOT_FOUND,
            body: Vec::new(),
        };
        let err = not_found.raise_for_status().unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}
