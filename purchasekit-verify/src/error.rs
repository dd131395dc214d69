//! Error types for receipt verification.

use purchasekit_keys::KeyError;
use thiserror::Error;

/// Receipt verification errors.
///
/// Decoding messages are generic by design: receipt payloads can embed
/// user identifiers, so the offending content is never echoed back.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The payload or signature could not be decoded or is missing
    /// required fields.
    #[error("receipt decoding error: {0}")]
    Decoding(&'static str),

    /// Key manager failure (missing key, keystore error).
    #[error("verification key error: {0}")]
    Key(#[from] KeyError),
}

impl VerifyError {
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Decoding(_) => false,
            Self::Key(err) => err.is_retryable(),
        }
    }
}

/// Result type for verification operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
