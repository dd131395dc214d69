//! Error types for verification metadata storage.

use purchasekit_secure::SecureStoreError;
use thiserror::Error;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Metadata store errors.
///
/// `Parse` is deliberately distinct from `Store`: an I/O failure may
/// succeed on retry, a corrupted record never will.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Underlying keystore I/O failure.
    #[error("metadata store error: {0}")]
    Store(String),

    /// A required field is missing or blank; nothing was written.
    #[error("metadata validation error: invalid {0}")]
    Validation(&'static str),

    /// A stored record is corrupted and cannot be decoded.
    #[error("metadata parse error for {0}")]
    Parse(String),

    /// No metadata exists for the transaction id.
    #[error("metadata not found: {0}")]
    NotFound(String),

    /// Unclassified failure.
    #[error("unknown metadata error: {0}")]
    Unknown(String),
}

impl MetadataError {
    /// Only I/O-level store failures benefit from retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<SecureStoreError> for MetadataError {
    fn from(err: SecureStoreError) -> Self {
        Self::Store(err.to_string())
    }
}
