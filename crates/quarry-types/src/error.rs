//! Error types for quarry.

use thiserror::Error;

/// Result type alias for quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Errors surfaced across crate boundaries.
///
/// Lower-level crates keep their own precise error enums; this type is what
/// the facade and the binary collapse them into.
#[derive(Error, Debug)]
pub enum QuarryError {
    /// HTTP request failed after all retries.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The run was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// The upstream answered without usable rows.
    #[error("No data: {0}")]
    NoData(String),

    /// Invalid wiring or configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuarryError {
    /// Returns true if this error represents cancellation rather than failure.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
