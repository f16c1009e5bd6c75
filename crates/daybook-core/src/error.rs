//! Error types for Daybook core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.
//!
//! Absence is not an error here: deleting an unknown entry, reading an empty
//! date, or paging past the end of the carousel are ordinary outcomes and are
//! reported through `Option`/`bool` return values instead.

use thiserror::Error;

/// Result type alias for Daybook operations.
pub type Result<T> = std::result::Result<T, DaybookError>;

/// Core error type for Daybook operations.
#[derive(Debug, Error)]
pub enum DaybookError {
    /// Persistence backend error (I/O, quota, permissions)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encoding or decoding of the persisted mapping failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Entry data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for DaybookError {
    fn from(err: std::io::Error) -> Self {
        DaybookError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DaybookError {
    fn from(err: serde_json::Error) -> Self {
        DaybookError::Serialization(err.to_string())
    }
}
