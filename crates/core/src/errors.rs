//! Core error types for the metafield services.

use metafield_resolution::ResolutionError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the field services.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Content repository error: {0}")]
    Repository(String),
}

impl Error {
    /// Returns true when the caller passed a malformed target.
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, Error::Resolution(ResolutionError::InvalidTarget(_)))
    }
}
