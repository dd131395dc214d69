//! Verification provenance metadata.

use crate::Platform;
use serde::{Deserialize, Serialize};

/// Record of when and with what key a transaction was verified.
///
/// Stored encrypted, separate from the purchase database, so that
/// verification provenance survives even if the purchase DB is
/// compromised. One-to-one with a verified purchase; never created for
/// an unverified one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationMetadata {
    pub transaction_id: String,
    pub product_id: String,
    /// When verification succeeded (milliseconds since Unix epoch).
    pub verified_at: i64,
    /// Identifier of the signing key used.
    pub signature_key: String,
    pub platform: Platform,
}

impl VerificationMetadata {
    /// Validates that all required fields are present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.transaction_id.trim().is_empty() {
            return Err("transaction_id");
        }
        if self.product_id.trim().is_empty() {
            return Err("product_id");
        }
        if self.verified_at <= 0 {
            return Err("verified_at");
        }
        if self.signature_key.trim().is_empty() {
            return Err("signature_key");
        }
        Ok(())
    }
}
