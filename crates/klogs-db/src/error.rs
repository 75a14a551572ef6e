//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Input rejected before anything was written.
    #[error("Validation error: {0}")]
    Validation(#[from] klogs_core::ValidationError),

    /// Date arithmetic left the representable range.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<klogs_core::Error> for Error {
    fn from(err: klogs_core::Error) -> Self {
        match err {
            klogs_core::Error::Validation(e) => Error::Validation(e),
            klogs_core::Error::DateOutOfRange(s) => Error::DateOutOfRange(s),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
