//! Test doubles for dependency injection
//!
//! Provides an in-memory secret store with the same contract as the platform
//! backends, for isolated testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::traits::{check_identity, SecretStore, StoreError};

type Entries = HashMap<(String, String), Vec<u8>>;

/// In-memory secret store for testing
///
/// Thread-safe storage backed by HashMap. No actual keychain interaction.
/// Clones share the same entries.
#[derive(Clone, Default)]
pub struct InMemorySecretStore {
    store: Arc<Mutex<Entries>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store with pre-populated (service, account, payload) entries
    pub fn with_entries(entries: Vec<(&str, &str, &[u8])>) -> Self {
        let map = entries
            .into_iter()
            .map(|(service, account, data)| {
                ((service.to_string(), account.to_string()), data.to_vec())
            })
            .collect();
        Self {
            store: Arc::new(Mutex::new(map)),
        }
    }

    /// Get all stored identities, sorted (for assertions)
    pub fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Clear all entries
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SecretStore for InMemorySecretStore {
    fn save(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::save_failed)?;
        let mut store = self.lock();
        let key = (service.to_string(), account.to_string());
        if store.contains_key(&key) {
            return Err(StoreError::save_failed("duplicate item"));
        }
        store.insert(key, data.to_vec());
        Ok(())
    }

    fn update(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::update_failed)?;
        match self.lock().get_mut(&(service.to_string(), account.to_string())) {
            Some(slot) => {
                *slot = data.to_vec();
                Ok(())
            }
            None => Err(StoreError::update_failed("item not found")),
        }
    }

    fn remove(&self, service: &str, account: &str) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::remove_failed)?;
        self.lock()
            .remove(&(service.to_string(), account.to_string()))
            .map(|_| ())
            .ok_or_else(|| StoreError::remove_failed("item not found"))
    }

    fn load(&self, service: &str, account: &str) -> Result<Vec<u8>, StoreError> {
        check_identity(service, account).map_err(StoreError::load_failed)?;
        self.lock()
            .get(&(service.to_string(), account.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::load_failed("item not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SecretStoreExt;

    #[test]
    fn test_secret_store() {
        let store = InMemorySecretStore::new();

        // Save
        store.save_text("app", "user1", "value1").unwrap();
        assert!(store.contains("app", "user1"));

        // Load
        assert_eq!(store.load_text("app", "user1").unwrap(), "value1");

        // Remove
        store.remove("app", "user1").unwrap();
        assert!(!store.contains("app", "user1"));
    }

    #[test]
    fn test_secret_store_with_entries() {
        let store = InMemorySecretStore::with_entries(vec![
            ("app", "user1", &b"value1"[..]),
            ("app", "user2", &b"value2"[..]),
        ]);

        assert_eq!(
            store.keys(),
            vec![
                ("app".to_string(), "user1".to_string()),
                ("app".to_string(), "user2".to_string()),
            ]
        );
        assert_eq!(store.load("app", "user2").unwrap(), b"value2".to_vec());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = InMemorySecretStore::new();
        let clone = store.clone();

        assert!(clone.save_key("token", "abc"));
        assert_eq!(store.load_key("token"), Some("abc".to_string()));

        store.clear();
        assert!(clone.keys().is_empty());
    }

    #[test]
    fn test_concurrent_saves_to_one_identity() {
        let store = InMemorySecretStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.save_text("app", "race", &format!("v{i}")).is_ok())
            })
            .collect();

        let winners = handles.into_iter().filter_map(|h| h.join().ok()).filter(|ok| *ok).count();
        assert_eq!(winners, 1);
    }
}
