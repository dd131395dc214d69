//! Receipt signature verification for PurchaseKit.
//!
//! Validates signed purchase receipts against the per-platform public
//! key held by the key manager:
//! - Structural validation of the JSON payload (required fields)
//! - Base64url signature decoding
//! - Ed25519 signature verification over the raw payload bytes
//! - App-identity check (`bundleId` / `packageName`) with a
//!   configurable mismatch policy
//!
//! Verification is a pure function of (payload, signature, platform,
//! cached key): no shared mutable state, safe to call concurrently.

mod error;
mod receipt;

pub use error::{VerifyError, VerifyResult};
pub use receipt::ReceiptPayload;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use purchasekit_keys::{KeyError, KeyManager};
use purchasekit_types::Platform;
use tracing::warn;

/// What to do when a receipt's embedded app identity does not match
/// the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityPolicy {
    /// Treat the receipt as invalid.
    #[default]
    Reject,
    /// Log a warning and let the signature verdict stand.
    Warn,
}

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// The bundle id / package name this app expects in receipts.
    pub expected_app_id: String,
    /// Policy for app-identity mismatches.
    pub identity_policy: IdentityPolicy,
}

impl VerifierConfig {
    /// Creates a config with the default hard-reject identity policy.
    #[must_use]
    pub fn new(expected_app_id: impl Into<String>) -> Self {
        Self {
            expected_app_id: expected_app_id.into(),
            identity_policy: IdentityPolicy::Reject,
        }
    }

    /// Switches identity mismatches to warn-only.
    #[must_use]
    pub fn warn_on_identity_mismatch(mut self) -> Self {
        self.identity_policy = IdentityPolicy::Warn;
        self
    }
}

/// The outcome of a successful verification run.
///
/// A mathematically bad signature or a rejected identity mismatch is a
/// *result* (`is_valid == false`), not an error; errors are reserved
/// for inputs that could not be decoded or keys that could not be
/// obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedReceipt {
    pub is_valid: bool,
    pub product_id: String,
    pub transaction_id: String,
}

/// Validates signed receipt payloads.
#[derive(Clone)]
pub struct ReceiptVerifier {
    keys: KeyManager,
    config: VerifierConfig,
}

impl ReceiptVerifier {
    #[must_use]
    pub fn new(keys: KeyManager, config: VerifierConfig) -> Self {
        Self { keys, config }
    }

    /// Verifies a raw receipt payload and its detached signature.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::Decoding`] for blank inputs, malformed JSON,
    ///   missing required fields, or a signature that does not decode
    ///   as base64url.
    /// - [`VerifyError::Key`] when the platform key is missing or the
    ///   keystore fails.
    pub async fn verify(
        &self,
        raw_payload: &str,
        signature: &str,
        platform: Platform,
    ) -> VerifyResult<VerifiedReceipt> {
        // Input checks come before any crypto or storage access.
        if raw_payload.trim().is_empty() {
            return Err(VerifyError::Decoding("payload is empty"));
        }
        if signature.trim().is_empty() {
            return Err(VerifyError::Decoding("signature is empty"));
        }

        let payload = ReceiptPayload::parse(raw_payload, platform)?;

        // A malformed signature encoding is a decoding error, never a
        // silent "parseable but invalid" verdict.
        let sig_bytes = URL_SAFE_NO_PAD
            .decode(signature.trim())
            .map_err(|_| VerifyError::Decoding("signature is not valid base64url"))?;
        let signature = Signature::from_slice(&sig_bytes)
            .map_err(|_| VerifyError::Decoding("signature has wrong length"))?;

        let verifying_key = self.load_verifying_key(platform).await?;

        let signature_ok = verifying_key
            .verify(raw_payload.as_bytes(), &signature)
            .is_ok();

        let is_valid = signature_ok && self.identity_check(&payload, platform);

        Ok(VerifiedReceipt {
            is_valid,
            product_id: payload.product_id,
            transaction_id: payload.transaction_id,
        })
    }

    /// Compares the payload's app identity to the expected one and
    /// applies the configured policy. Returns whether the receipt may
    /// still count as valid.
    fn identity_check(&self, payload: &ReceiptPayload, platform: Platform) -> bool {
        let matches = payload.app_id.as_deref() == Some(self.config.expected_app_id.as_str());
        if matches {
            return true;
        }
        match self.config.identity_policy {
            IdentityPolicy::Reject => false,
            IdentityPolicy::Warn => {
                warn!(
                    platform = %platform,
                    transaction_id = %payload.transaction_id,
                    "receipt app identity does not match expected app id"
                );
                true
            }
        }
    }

    async fn load_verifying_key(&self, platform: Platform) -> VerifyResult<VerifyingKey> {
        let material = self.keys.load_key(platform).await?;

        let key_bytes = URL_SAFE_NO_PAD
            .decode(material.trim())
            .map_err(|_| VerifyError::Key(KeyError::InvalidKeyFormat))?;
        let key_bytes: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| VerifyError::Key(KeyError::InvalidKeyFormat))?;

        VerifyingKey::from_bytes(&key_bytes)
            .map_err(|_| VerifyError::Key(KeyError::InvalidKeyFormat))
    }
}
