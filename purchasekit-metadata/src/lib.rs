//! Encrypted verification metadata storage for PurchaseKit.
//!
//! Records *when and with what key* each transaction was verified, in
//! the OS-encrypted keystore, separate from the purchase database.
//! This lets a cold start restore verification state without
//! re-verifying receipts, and keeps verification provenance intact
//! even if the purchase database is compromised.
//!
//! Restoration is best-effort: a single corrupted record must never
//! make the app forget every previously verified purchase, so
//! [`MetadataStore::restore_all`] skips unparsable entries and returns
//! the valid subset.

mod error;

pub use error::{MetadataError, MetadataResult};

use purchasekit_secure::SecureStore;
use purchasekit_types::VerificationMetadata;
use std::sync::Arc;
use tracing::{debug, warn};

/// Keystore namespace for verification metadata.
const META_PREFIX: &str = "vmeta.";

/// Secure store of verification provenance, one record per verified
/// transaction.
#[derive(Clone)]
pub struct MetadataStore {
    store: Arc<dyn SecureStore>,
}

impl MetadataStore {
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Persists a metadata record.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Validation`] naming the first invalid
    /// field; nothing is written on validation failure.
    pub async fn save(&self, metadata: &VerificationMetadata) -> MetadataResult<()> {
        metadata.validate().map_err(MetadataError::Validation)?;

        let json = serde_json::to_string(metadata)
            .map_err(|e| MetadataError::Unknown(e.to_string()))?;
        self.store.put(&entry_key(&metadata.transaction_id), &json)?;
        debug!(transaction_id = %metadata.transaction_id, "verification metadata saved");
        Ok(())
    }

    /// Loads the record for a transaction.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::NotFound`] when no record exists.
    /// - [`MetadataError::Parse`] when the stored record is corrupted;
    ///   retrying cannot help.
    pub async fn get(&self, transaction_id: &str) -> MetadataResult<VerificationMetadata> {
        if transaction_id.trim().is_empty() {
            return Err(MetadataError::Validation("transaction_id"));
        }
        let raw = self
            .store
            .get(&entry_key(transaction_id))?
            .ok_or_else(|| MetadataError::NotFound(transaction_id.to_string()))?;

        serde_json::from_str(&raw)
            .map_err(|_| MetadataError::Parse(transaction_id.to_string()))
    }

    /// Loads every readable record, skipping corrupted entries.
    ///
    /// Skipped entries are logged (id only, never contents) and
    /// dropped; the valid subset is returned as success.
    pub async fn restore_all(&self) -> MetadataResult<Vec<VerificationMetadata>> {
        let keys = self.store.keys_with_prefix(META_PREFIX)?;

        let mut restored = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.store.get(&key)? else {
                continue;
            };
            match serde_json::from_str::<VerificationMetadata>(&raw) {
                Ok(metadata) => restored.push(metadata),
                Err(_) => {
                    warn!(entry = %key, "skipping corrupted verification metadata entry");
                }
            }
        }
        debug!(count = restored.len(), "verification metadata restored");
        Ok(restored)
    }

    /// Removes the record for a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotFound`] when no record exists.
    pub async fn delete(&self, transaction_id: &str) -> MetadataResult<()> {
        if transaction_id.trim().is_empty() {
            return Err(MetadataError::Validation("transaction_id"));
        }
        if !self.store.delete(&entry_key(transaction_id))? {
            return Err(MetadataError::NotFound(transaction_id.to_string()));
        }
        Ok(())
    }

    /// Removes every record, best-effort per entry. Used for full
    /// account/privacy erasure: one failed delete must not abort the
    /// rest. Returns the number of entries removed.
    pub async fn clear_all(&self) -> MetadataResult<usize> {
        let keys = self.store.keys_with_prefix(META_PREFIX)?;

        let mut removed = 0;
        for key in keys {
            match self.store.delete(&key) {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(entry = %key, error = %err, "failed to delete metadata entry");
                }
            }
        }
        debug!(removed, "verification metadata cleared");
        Ok(removed)
    }
}

fn entry_key(transaction_id: &str) -> String {
    format!("{META_PREFIX}{transaction_id}")
}
