//! Error types for the purchase store.

use thiserror::Error;

/// Result type for purchase store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in purchase store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required input was empty, blank, or malformed. Caller error,
    /// never retryable; storage is not touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No purchase exists for the transaction id.
    #[error("purchase not found: {0}")]
    NotFound(String),

    /// Underlying database failure. `retryable` distinguishes transient
    /// faults (lock contention, timeouts) from integrity violations
    /// (duplicate transaction id, corrupt state); callers auto-retry on
    /// the former only.
    #[error("database error: {message}")]
    Database { message: String, retryable: bool },
}

impl StoreError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidInput(_) | Self::NotFound(_) => false,
            Self::Database { retryable, .. } => *retryable,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        let retryable = match &err {
            rusqlite::Error::SqliteFailure(code, _) => !matches!(
                code.code,
                ErrorCode::ConstraintViolation
                    | ErrorCode::DatabaseCorrupt
                    | ErrorCode::NotADatabase
                    | ErrorCode::TypeMismatch
            ),
            // Row decoding and statement-shape problems are programming
            // errors; retrying cannot help.
            _ => false,
        };
        Self::Database { message: err.to_string(), retryable }
    }
}
