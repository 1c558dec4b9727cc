//! Shared secret store handle
//!
//! `build_store` is the injection seam: callers and tests pick a backend
//! explicitly. `shared` is the one process-wide handle, built lazily from the
//! environment on first use and never rebuilt.

use std::sync::{Arc, OnceLock};

use crate::config::{BackendKind, ConfigError, StoreConfig};
use crate::mocks::InMemorySecretStore;
use crate::production::{DevFileSecretStore, KeychainSecretStore};
use crate::traits::SecretStore;

static SHARED: OnceLock<Arc<dyn SecretStore>> = OnceLock::new();

/// Construct a secret store for the given configuration
pub fn build_store(config: &StoreConfig) -> Result<Arc<dyn SecretStore>, ConfigError> {
    config.validate()?;
    let store: Arc<dyn SecretStore> = match config.backend {
        BackendKind::Keychain => {
            tracing::info!("Keychain secret store initialized");
            Arc::new(KeychainSecretStore::new())
        }
        BackendKind::File => {
            let path = config.file_path.clone().ok_or(ConfigError::MissingFilePath)?;
            tracing::info!(
                path = %path.display(),
                "DEV MODE: file-based secret store (no Keychain prompts)"
            );
            Arc::new(DevFileSecretStore::new(path))
        }
        BackendKind::Memory => {
            tracing::info!("In-memory secret store initialized");
            Arc::new(InMemorySecretStore::new())
        }
    };
    Ok(store)
}

/// The process-wide secret store
pub fn shared() -> Arc<dyn SecretStore> {
    SHARED
        .get_or_init(|| {
            let config = StoreConfig::from_env().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Invalid secret store configuration, using keychain");
                StoreConfig::default()
            });
            build_store(&config).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to keychain secret store");
                Arc::new(KeychainSecretStore::new())
            })
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SecretStoreExt;

    #[test]
    fn test_build_memory_store() {
        let config = StoreConfig {
            backend: BackendKind::Memory,
            file_path: None,
        };
        let store = build_store(&config).unwrap();

        store.save_text("app", "user1", "secret123").unwrap();
        assert_eq!(store.load_text("app", "user1").unwrap(), "secret123");
    }

    #[test]
    fn test_build_file_store() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StoreConfig {
            backend: BackendKind::File,
            file_path: Some(dir.path().join("secrets.json")),
        };
        let store = build_store(&config).unwrap();

        assert!(store.save_key("token", "abc"));
        assert!(dir.path().join("secrets.json").exists());
    }

    #[test]
    fn test_build_file_store_without_path() {
        let config = StoreConfig {
            backend: BackendKind::File,
            file_path: None,
        };
        assert!(matches!(build_store(&config), Err(ConfigError::MissingFilePath)));
    }

    #[test]
    fn test_shared_is_one_instance() {
        let first = shared();
        let second = shared();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
