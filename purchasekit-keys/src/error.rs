//! Error types for key management.

use purchasekit_secure::SecureStoreError;
use purchasekit_types::Platform;
use thiserror::Error;

/// Key management errors. Error text never contains key material.
#[derive(Debug, Error)]
pub enum KeyError {
    /// Key material is empty or whitespace-only.
    #[error("invalid key format: material is empty")]
    InvalidKeyFormat,

    /// No key is cached for the platform. Expected outcome; the caller
    /// should provision a key.
    #[error("no verification key cached for {0}")]
    NotFound(Platform),

    /// Underlying keystore failure, with the original cause attached.
    #[error("key store error: {0}")]
    Store(String),
}

impl KeyError {
    /// Whether retrying the operation can help. Only infrastructure
    /// failures are retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<SecureStoreError> for KeyError {
    fn from(err: SecureStoreError) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;
