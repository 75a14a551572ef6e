//! Error types for klogs-core

use thiserror::Error;

/// User input that was rejected before any record was created.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field, as shown to the user.
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Reject a blank (empty or whitespace-only) text field.
    pub(crate) fn require_text(field: &'static str, value: &str) -> std::result::Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(Self::new(field, "is required"))
        } else {
            Ok(())
        }
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
