//! Request failures.

use thiserror::Error;

/// Why a request did not produce a usable answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// The URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx response. `message` is the server's own message when it
    /// sent one, otherwise the status text.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// A 2xx body that could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No answer within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request body could not be encoded.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// True for failures where no HTTP response was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::RequestError(_) | FetchError::InvalidUrl(_) | FetchError::Timeout
        )
    }

    /// Status code of an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}
