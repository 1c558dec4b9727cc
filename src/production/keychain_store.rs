//! OS credential store implementation via the `keyring` crate.
//!
//! Entries are generic-password items addressed by (service, account):
//! macOS Keychain, Windows Credential Manager, or on Linux the kernel keyring
//! backed by the Secret Service, so entries survive logout and reboot.
//! The platform API only exposes upsert writes, so `save` and `update` probe
//! for the entry first to keep add-only and update-only semantics.

use keyring::Entry;

use crate::production::StoreStatus;
use crate::traits::{check_identity, SecretStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// `save`: the entry must not exist yet
    AddOnly,
    /// `update`: the entry must already exist
    UpdateOnly,
}

/// Stateless adapter; all state lives in the platform store.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainSecretStore;

impl KeychainSecretStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(service: &str, account: &str) -> Result<Entry, StoreStatus> {
        check_identity(service, account)
            .map_err(|reason| StoreStatus::InvalidIdentity(reason.to_string()))?;
        Entry::new(service, account).map_err(StoreStatus::from)
    }

    fn write(
        service: &str,
        account: &str,
        data: &[u8],
        mode: WriteMode,
    ) -> Result<(), StoreStatus> {
        let entry = Self::entry(service, account)?;
        let exists = probe(entry.get_secret())?;
        check_write(mode, exists)?;
        entry.set_secret(data).map_err(StoreStatus::from)
    }
}

/// Interpret a probing read: `Ok(true)` if present, `Ok(false)` if not.
fn probe(read: keyring::Result<Vec<u8>>) -> Result<bool, StoreStatus> {
    match read {
        Ok(_) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(StoreStatus::from(e)),
    }
}

/// Whether a write in `mode` may go ahead given the probe result
fn check_write(mode: WriteMode, exists: bool) -> Result<(), StoreStatus> {
    match (mode, exists) {
        (WriteMode::AddOnly, true) => Err(StoreStatus::DuplicateItem),
        (WriteMode::UpdateOnly, false) => Err(StoreStatus::ItemNotFound),
        _ => Ok(()),
    }
}

impl SecretStore for KeychainSecretStore {
    fn save(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        Self::write(service, account, data, WriteMode::AddOnly)
            .map_err(StoreError::save_failed)?;
        tracing::debug!(service = %service, account = %account, "Saved secret");
        Ok(())
    }

    fn update(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError> {
        Self::write(service, account, data, WriteMode::UpdateOnly)
            .map_err(StoreError::update_failed)?;
        tracing::debug!(service = %service, account = %account, "Updated secret");
        Ok(())
    }

    fn remove(&self, service: &str, account: &str) -> Result<(), StoreError> {
        let entry = Self::entry(service, account).map_err(StoreError::remove_failed)?;
        entry
            .delete_credential()
            .map_err(|e| StoreError::remove_failed(StoreStatus::from(e)))?;
        tracing::debug!(service = %service, account = %account, "Removed secret");
        Ok(())
    }

    fn load(&self, service: &str, account: &str) -> Result<Vec<u8>, StoreError> {
        let entry = Self::entry(service, account).map_err(StoreError::load_failed)?;
        let data = entry
            .get_secret()
            .map_err(|e| StoreError::load_failed(StoreStatus::from(e)))?;
        tracing::debug!(service = %service, account = %account, "Loaded secret");
        Ok(data)
    }
}
