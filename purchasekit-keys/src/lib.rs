//! Verification key management for PurchaseKit.
//!
//! Caches the per-platform public signing keys used to validate
//! receipts, backed by the OS encrypted keystore via the
//! [`SecureStore`] seam. There is no expiry or TTL; key rotation is a
//! future extension point and keys live until explicitly cleared.

mod error;

pub use error::{KeyError, KeyResult};

use purchasekit_secure::SecureStore;
use purchasekit_types::Platform;
use std::sync::Arc;
use tracing::debug;

/// Keystore namespace for verification keys.
const KEY_PREFIX: &str = "pubkey.";

/// Secure, per-platform cache of public signing keys.
///
/// Stateless between calls; all state lives in the backing store, so
/// concurrent use from multiple tasks is safe.
#[derive(Clone)]
pub struct KeyManager {
    store: Arc<dyn SecureStore>,
}

impl KeyManager {
    #[must_use]
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self { store }
    }

    /// Loads the cached key for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::NotFound`] when no key is cached. This is an
    /// expected outcome: the caller must provision a key, not fail hard.
    pub async fn load_key(&self, platform: Platform) -> KeyResult<String> {
        match self.store.get(&storage_key(platform))? {
            Some(material) => Ok(material),
            None => Err(KeyError::NotFound(platform)),
        }
    }

    /// Caches `material` as the verification key for `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyFormat`] for empty or
    /// whitespace-only material, without touching storage.
    pub async fn cache_key(&self, platform: Platform, material: &str) -> KeyResult<()> {
        if material.trim().is_empty() {
            return Err(KeyError::InvalidKeyFormat);
        }
        self.store.put(&storage_key(platform), material)?;
        debug!(platform = %platform, "verification key cached");
        Ok(())
    }

    /// Removes the cached key for `platform`. Clearing an absent key is
    /// not an error.
    pub async fn clear_key(&self, platform: Platform) -> KeyResult<()> {
        let existed = self.store.delete(&storage_key(platform))?;
        debug!(platform = %platform, existed, "verification key cleared");
        Ok(())
    }
}

fn storage_key(platform: Platform) -> String {
    format!("{KEY_PREFIX}{platform}")
}
