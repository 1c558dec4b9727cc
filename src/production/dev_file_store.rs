//! File-based secret store for development builds
//!
//! Avoids OS keychain prompts while iterating locally. Entries live in a plain
//! JSON file shaped `{ service: { account: [bytes] } }`. Every call reads the
//! file; mutations rewrite it through a temp file and rename, so instances on
//! the same path always see each other's writes.
//!
//! WARNING: Not secure. Payloads are written unencrypted.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::NamedTempFile;

use crate::traits::{check_identity, SecretStore, StoreError};

type Vault = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// Serializes read-modify-write cycles of all dev file stores in the process.
static FILE_LOCK: Mutex<()> = Mutex::new(());

pub struct DevFileSecretStore {
    path: PathBuf,
}

impl DevFileSecretStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock() -> MutexGuard<'static, ()> {
        FILE_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the vault. Only a missing file counts as empty; anything else is
    /// an error so an unreadable file is never overwritten.
    fn read_vault(&self) -> Result<Vault, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| format!("cannot parse {}: {e}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vault::new()),
            Err(e) => Err(format!("cannot read {}: {e}", self.path.display())),
        }
    }

    fn write_vault(&self, vault: &Vault) -> Result<(), String> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .map_err(|e| format!("cannot create temp file in {}: {e}", dir.display()))?;
        serde_json::to_writer_pretty(&mut tmp, vault).map_err(|e| e.to_string())?;
        tmp.as_file().sync_all().map_err(|e| e.to_string())?;
        tmp.persist(&self.path)
            .map_err(|e| format!("cannot replace {}: {}", self.path.display(), e.error))?;
        Ok(())
    }
}

impl SecretStore for DevFileSecretStore {
    fn save(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::save_failed)?;
        let _guard = Self::lock();
        let mut vault = self.read_vault().map_err(StoreError::save_failed)?;
        let accounts = vault.entry(service.to_string()).or_default();
        if accounts.contains_key(account) {
            return Err(StoreError::save_failed("duplicate item"));
        }
        accounts.insert(account.to_string(), data.to_vec());
        self.write_vault(&vault).map_err(StoreError::save_failed)?;
        tracing::debug!(service = %service, account = %account, "Saved secret to dev file");
        Ok(())
    }

    fn update(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::update_failed)?;
        let _guard = Self::lock();
        let mut vault = self.read_vault().map_err(StoreError::update_failed)?;
        let Some(slot) = vault.get_mut(service).and_then(|a| a.get_mut(account)) else {
            return Err(StoreError::update_failed("item not found"));
        };
        *slot = data.to_vec();
        self.write_vault(&vault).map_err(StoreError::update_failed)?;
        tracing::debug!(service = %service, account = %account, "Updated secret in dev file");
        Ok(())
    }

    fn remove(&self, service: &str, account: &str) -> Result<(), StoreError> {
        check_identity(service, account).map_err(StoreError::remove_failed)?;
        let _guard = Self::lock();
        let mut vault = self.read_vault().map_err(StoreError::remove_failed)?;
        if remove_entry(&mut vault, service, account).is_none() {
            return Err(StoreError::remove_failed("item not found"));
        }
        self.write_vault(&vault).map_err(StoreError::remove_failed)?;
        tracing::debug!(service = %service, account = %account, "Removed secret from dev file");
        Ok(())
    }

    fn load(&self, service: &str, account: &str) -> Result<Vec<u8>, StoreError> {
        check_identity(service, account).map_err(StoreError::load_failed)?;
        let _guard = Self::lock();
        let vault = self.read_vault().map_err(StoreError::load_failed)?;
        vault
            .get(service)
            .and_then(|accounts| accounts.get(account))
            .cloned()
            .ok_or_else(|| StoreError::load_failed("item not found"))
    }
}

/// Remove one account, dropping the service map once it is empty.
fn remove_entry(vault: &mut Vault, service: &str, account: &str) -> Option<Vec<u8>> {
    let accounts = vault.get_mut(service)?;
    let removed = accounts.remove(account);
    if accounts.is_empty() {
        vault.remove(service);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SecretStoreExt;
    use tempfile::TempDir;

    fn temp_store() -> (DevFileSecretStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = DevFileSecretStore::new(dir.path().join("dev-secrets.json"));
        (store, dir)
    }

    #[test]
    fn test_persists_across_instances() {
        let (store, dir) = temp_store();
        store.save_text("app", "user1", "secret123").unwrap();

        let reopened = DevFileSecretStore::new(dir.path().join("dev-secrets.json"));
        assert_eq!(reopened.load_text("app", "user1").unwrap(), "secret123");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (store, _dir) = temp_store();

        let err = store.load("app", "user1").unwrap_err();
        assert_eq!(err.to_string(), "Load failed: item not found");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_remove_drops_empty_service() {
        let (store, _dir) = temp_store();
        store.save_text("app", "user1", "a").unwrap();
        store.remove("app", "user1").unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let vault: Vault = serde_json::from_str(&content).unwrap();
        assert!(vault.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_never_overwritten() {
        let (store, _dir) = temp_store();
        let corrupt = r#"{"app":{"user1":[1,2,3]}, TRUNCATED"#;
        std::fs::write(store.path(), corrupt).unwrap();

        assert!(matches!(store.save("other", "x", b"y"), Err(StoreError::SaveFailed(_))));
        assert!(matches!(store.update("app", "user1", b"y"), Err(StoreError::UpdateFailed(_))));
        assert!(matches!(store.remove("app", "user1"), Err(StoreError::RemoveFailed(_))));
        let err = store.load("app", "user1").unwrap_err();
        assert!(matches!(err, StoreError::LoadFailed(ref m) if m.contains("cannot parse")));

        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), corrupt);
    }

    #[test]
    fn test_failed_write_leaves_no_entry() {
        let dir = TempDir::new().unwrap();
        // Parent directory does not exist, so every write fails
        let store = DevFileSecretStore::new(dir.path().join("missing").join("dev-secrets.json"));

        assert!(matches!(store.save("app", "user1", b"x"), Err(StoreError::SaveFailed(_))));
        assert!(matches!(store.load("app", "user1"), Err(StoreError::LoadFailed(_))));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let (store, dir) = temp_store();
        store.save_text("app", "user1", "a").unwrap();
        store.update_text("app", "user1", "b").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("dev-secrets.json")]);
    }
}
