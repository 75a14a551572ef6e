//! Error types for klogs-report

use thiserror::Error;

/// Report error type
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from the store failed
    #[error("Store error: {0}")]
    Store(#[from] klogs_db::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, Error>;
