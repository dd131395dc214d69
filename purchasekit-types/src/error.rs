//! The canonical purchase error taxonomy.
//!
//! Every platform/SDK error shape is mapped into [`PurchaseError`] by the
//! mapper crate. Retryability is fixed per variant; a caller-supplied
//! flag on an incoming raw error never overrides it. Connectivity
//! failures are the one category that must always be retried, which is
//! why the mapper gives message-content network detection priority over
//! structural platform codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable wire codes for the canonical taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseErrorCode {
    NetworkError,
    StoreProblemError,
    PurchaseCancelled,
    PurchaseInvalid,
    ProductUnavailable,
    UnknownError,
}

impl PurchaseErrorCode {
    /// Returns the SCREAMING_SNAKE wire name for this code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::StoreProblemError => "STORE_PROBLEM_ERROR",
            Self::PurchaseCancelled => "PURCHASE_CANCELLED",
            Self::PurchaseInvalid => "PURCHASE_INVALID",
            Self::ProductUnavailable => "PRODUCT_UNAVAILABLE",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

/// Why a purchase was judged invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// The receipt signature did not verify.
    SignatureMismatch,
    /// The receipt's app identity does not match this app.
    BundleMismatch,
    /// The platform reports the purchase as revoked/refunded.
    Revoked,
}

/// Canonical purchase error, unified across StoreKit 2, Google Play
/// Billing, and the purchase-relay SDK.
///
/// Modeled as a tagged union: structural type detection happens in the
/// mapper, never via runtime class hierarchies.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseError {
    /// Connectivity or timeout failure. Always retryable.
    #[error("network error: {message}")]
    NetworkError { message: String },

    /// Platform store backend fault. Retryable.
    #[error("store problem: {message}")]
    StoreProblemError { message: String },

    /// The user cancelled the purchase flow.
    #[error("purchase cancelled by user")]
    PurchaseCancelled,

    /// Signature/bundle mismatch or revoked purchase.
    #[error("purchase invalid")]
    PurchaseInvalid { reason: InvalidReason },

    /// The product is withdrawn or misconfigured.
    #[error("product unavailable: {product_id}")]
    ProductUnavailable { product_id: String },

    /// Unclassified failure; the mapping dead end.
    #[error("unknown purchase error: {message}")]
    UnknownError { message: String },
}

impl PurchaseError {
    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> PurchaseErrorCode {
        match self {
            Self::NetworkError { .. } => PurchaseErrorCode::NetworkError,
            Self::StoreProblemError { .. } => PurchaseErrorCode::StoreProblemError,
            Self::PurchaseCancelled => PurchaseErrorCode::PurchaseCancelled,
            Self::PurchaseInvalid { .. } => PurchaseErrorCode::PurchaseInvalid,
            Self::ProductUnavailable { .. } => PurchaseErrorCode::ProductUnavailable,
            Self::UnknownError { .. } => PurchaseErrorCode::UnknownError,
        }
    }

    /// Fixed retryability verdict for this error. Only transient
    /// infrastructure failures retry; user and integrity failures never do.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::StoreProblemError { .. }
        )
    }

    /// Returns the human-readable message carried by this error, if any.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
