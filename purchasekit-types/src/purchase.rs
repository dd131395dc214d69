//! Purchase records and creation inputs.

use serde::{Deserialize, Serialize};

/// A recorded in-app purchase transaction.
///
/// One record per platform transaction. The record is created once, at
/// recording time, and mutated only through the store's two narrow
/// setters (verification status and sync status). Deletion is a hard,
/// cascading delete.
///
/// # Invariants
/// - `is_synced == true` implies `synced_at.is_some()`.
/// - An unverified record has no unlocked features at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Platform-supplied transaction identifier. Unique, immutable.
    pub transaction_id: String,
    /// Store product identifier.
    pub product_id: String,
    /// Purchase time (milliseconds since Unix epoch).
    pub purchased_at: i64,
    /// Price in the purchase currency.
    pub price: f64,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Set only by a successful receipt verification.
    pub is_verified: bool,
    /// Identifier of the key used to verify, for audit.
    pub verification_key: Option<String>,
    /// Whether the purchase has been acknowledged to a remote trust
    /// service (future extension).
    pub is_synced: bool,
    /// When the purchase was synced (milliseconds since Unix epoch).
    pub synced_at: Option<i64>,
    /// Feature ids unlocked by this purchase, in grant order.
    pub unlocked_features: Vec<String>,
}

impl Purchase {
    /// Checks the sync-stamp invariant on this record.
    #[must_use]
    pub fn sync_stamp_consistent(&self) -> bool {
        !self.is_synced || self.synced_at.is_some()
    }
}

/// Input for recording a new purchase.
///
/// Sync stamps are never set at creation; a record starts unsynced and
/// is promoted later through the store's sync setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub transaction_id: String,
    pub product_id: String,
    pub purchased_at: i64,
    pub price: f64,
    pub currency_code: String,
    pub is_verified: bool,
    pub verification_key: Option<String>,
    pub unlocked_features: Vec<String>,
}

impl NewPurchase {
    /// Creates an unverified purchase input with no features.
    #[must_use]
    pub fn new(
        transaction_id: impl Into<String>,
        product_id: impl Into<String>,
        purchased_at: i64,
        price: f64,
        currency_code: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            product_id: product_id.into(),
            purchased_at,
            price,
            currency_code: currency_code.into(),
            is_verified: false,
            verification_key: None,
            unlocked_features: Vec::new(),
        }
    }

    /// Marks the input verified, recording the key used.
    #[must_use]
    pub fn verified(mut self, key: impl Into<String>) -> Self {
        self.is_verified = true;
        self.verification_key = Some(key.into());
        self
    }

    /// Sets the features this purchase unlocks. Only meaningful on a
    /// verified input; the store rejects features on an unverified one.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unlocked_features = features.into_iter().map(Into::into).collect();
        self
    }
}
