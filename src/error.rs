use thiserror::Error;

/// Errors surfaced by the WebDAV client.
///
/// Non-success HTTP statuses are not errors at the raw request layer; they
/// become [`DavError::Status`] only when a caller asks for the translation
/// via `raise_for_status`, which the session façade does on every round
/// trip.
#[derive(Error, Debug)]
pub enum DavError {
    /// The server answered with a non-2xx/207 status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The multi-status payload was not well-formed XML.
    #[error("failed to parse multi-status response: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Transport-level failure from the HTTP client.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request method that is not a valid HTTP token.
    #[error("invalid request method: {0:?}")]
    Method(String),

    /// A computed header value (e.g. `Destination`) was not representable.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// The client configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl DavError {
    /// The HTTP status code carried by [`DavError::Status`], if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DavError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
