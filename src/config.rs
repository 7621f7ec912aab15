use std::fmt;
use std::time::Duration;

use crate::error::DavError;

/// URL scheme of the WebDAV endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => f.write_str("http"),
            Scheme::Https => f.write_str("https"),
        }
    }
}

/// Credentials handed to the HTTP transport.
#[derive(Debug, Clone)]
pub enum Auth {
    Basic { username: String, password: String },
}

/// Connection settings for a [`DavClient`](crate::DavClient).
///
/// The base URL is `scheme://host:port`, optionally extended by
/// `base_path`, e.g. `remote.php/dav/files/USERNAME` on ownCloud-family
/// servers. Every request path is interpreted relative to that base.
#[derive(Debug, Clone)]
pub struct DavConfig {
    pub host: String,
    /// Server port; defaults to the scheme's well-known port.
    pub port: Option<u16>,
    pub scheme: Scheme,
    pub auth: Option<Auth>,
    /// Extra path prefix considered part of the base URL.
    pub base_path: Option<String>,
    /// Per-request timeout; the transport default applies when unset.
    pub timeout: Option<Duration>,
}

impl DavConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            scheme: Scheme::Https,
            auth: None,
            base_path: None,
            timeout: None,
        }
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Derives scheme, host and port from an absolute URL. Used by the
    /// one-shot `request` command, which addresses a full URL instead of a
    /// configured host.
    pub fn from_url(url: &str) -> Result<Self, DavError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| DavError::Config(format!("invalid URL {url:?}: {e}")))?;
        let scheme = match parsed.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(DavError::Config(format!(
                    "unsupported URL scheme {other:?}, expected http or https"
                )))
            }
        };
        let host = parsed
            .host_str()
            .ok_or_else(|| DavError::Config(format!("URL {url:?} has no host")))?
            .to_string();
        let mut config = DavConfig::new(host).scheme(scheme);
        if let Some(port) = parsed.port() {
            config = config.port(port);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DavError> {
        if self.host.trim().is_empty() {
            return Err(DavError::Config("host is empty".to_string()));
        }
        if self.host.contains('/') || self.host.contains("://") {
            return Err(DavError::Config(format!(
                "host {:?} must be a bare host name, without scheme or path \
                 (examples: demo.owncloud.com, 192.168.1.100)",
                self.host
            )));
        }
        Ok(())
    }

    /// The absolute URL every request path is appended to. No trailing
    /// slash.
    pub fn base_url(&self) -> String {
        let port = self.port.unwrap_or_else(|| self.scheme.default_port());
        let mut url = format!("{}://{}:{}", self.scheme, self.host, port);
        if let Some(path) = &self.base_path {
            let trimmed = path.trim_matches('/');
            if !trimmed.is_empty() {
                url.push('/');
                url.push_str(trimmed);
            }
        }
        url
    }
}
