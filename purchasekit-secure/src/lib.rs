//! Abstract secure-storage interface for the OS encrypted keystore.
//!
//! Consumers (the key manager and the verification metadata store)
//! depend on `Arc<dyn SecureStore>` — they never see how values are
//! encrypted at rest. Platform shells provide the real keystore-backed
//! implementation; tests use [`MemorySecureStore`].

use std::collections::BTreeMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors from the secure-storage layer.
///
/// Messages describe the underlying cause and never contain stored
/// values or key material.
#[derive(Debug, Clone, Error)]
pub enum SecureStoreError {
    /// The keystore is locked or not available on this device.
    #[error("secure store unavailable")]
    Unavailable,
    /// Underlying I/O or keystore failure.
    #[error("secure store I/O error: {0}")]
    Io(String),
}

pub type SecureStoreResult<T> = Result<T, SecureStoreError>;

/// Trait for an encrypted string key-value store.
///
/// Implementations own encryption at rest. All operations are
/// whole-value; there is no partial update.
pub trait SecureStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> SecureStoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> SecureStoreResult<()>;

    /// Removes `key`. Returns whether a value existed.
    fn delete(&self, key: &str) -> SecureStoreResult<bool>;

    /// Lists all keys starting with `prefix`, in lexicographic order.
    fn keys_with_prefix(&self, prefix: &str) -> SecureStoreResult<Vec<String>>;
}

/// In-memory store for tests and pre-provisioning.
/// Values are held unencrypted; never use outside tests.
#[derive(Default)]
pub struct MemorySecureStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySecureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStore for MemorySecureStore {
    fn get(&self, key: &str) -> SecureStoreResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SecureStoreError::Io("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> SecureStoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SecureStoreError::Io("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> SecureStoreResult<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| SecureStoreError::Io("lock poisoned".to_string()))?;
        Ok(entries.remove(key).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> SecureStoreResult<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SecureStoreError::Io("lock poisoned".to_string()))?;
        Ok(entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let store = MemorySecureStore::new();
        assert!(store.get("a").unwrap().is_none());

        store.put("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.put("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn prefix_listing_is_ordered() {
        let store = MemorySecureStore::new();
        store.put("vmeta.b", "2").unwrap();
        store.put("vmeta.a", "1").unwrap();
        store.put("pubkey.ios", "k").unwrap();

        let keys = store.keys_with_prefix("vmeta.").unwrap();
        assert_eq!(keys, vec!["vmeta.a", "vmeta.b"]);
    }
}
