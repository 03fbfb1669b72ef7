//! Error types for the request pipeline.

use crate::transport::TransportError;

/// Errors that can occur when executing a request.
///
/// Exactly one variant applies to a failed execution. Transport, status and
/// decode failures are all converted into this type at the executor boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request URL could not be built or is not an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The server answered with a success status but an empty body.
    #[error("No data received")]
    NoData,
    /// The response body did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(#[source] serde_json::Error),
    /// The API returned a non-success status. The body text is kept for diagnostics.
    #[error("HTTP error {status}")]
    Http { status: u16, body: Option<String> },
    /// The request never produced a response (connect, timeout, TLS, DNS).
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),
    /// The transport produced something that is not a valid HTTP response.
    #[error("Invalid response (status {status})")]
    InvalidResponse { status: u16 },
}

/// Fieldless discriminant of [`Error`], handy for matching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidUrl,
    NoData,
    Decoding,
    Http,
    Transport,
    InvalidResponse,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::NoData => ErrorKind::NoData,
            Error::Decoding(_) => ErrorKind::Decoding,
            Error::Http { .. } => ErrorKind::Http,
            Error::Transport(_) => ErrorKind::Transport,
            Error::InvalidResponse { .. } => ErrorKind::InvalidResponse,
        }
    }

    /// HTTP status attached to the failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } | Error::InvalidResponse { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}
