//! Errors produced while fetching and decoding.

use quarry_types::QuarryError;
use thiserror::Error;

/// HTTP status the upstream uses to signal rate limiting.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Errors that can occur while talking to the upstream API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-200 status.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The caller's cancellation token fired while waiting.
    #[error("Operation cancelled")]
    Cancelled,

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The response decoded but carried no usable payload.
    #[error("No data: {0}")]
    NoData(String),

    /// The request could not be formed from the given arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be built.
    #[error("Client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Returns true if this error represents cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the server signalled rate limiting.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: TOO_MANY_REQUESTS
            }
        )
    }
}

/// Errors that can occur while decoding a response body.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed JSON or an unexpected token where a structure was required.
    #[error("Decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FetchError> for QuarryError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Cancelled => Self::Cancelled,
            FetchError::Decode(e) => Self::Decode(e.to_string()),
            FetchError::NoData(msg) => Self::NoData(msg),
            FetchError::Client(msg) | FetchError::InvalidRequest(msg) => Self::Config(msg),
            other => Self::Http(other.to_string()),
        }
    }
}
