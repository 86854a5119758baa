//! Error types for learning-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors from interpreting stored catalog/profile data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("unknown game type: {0}")]
    UnknownGameType(String),

    #[error("unknown requirement type: {0}")]
    UnknownRequirement(String),
}
