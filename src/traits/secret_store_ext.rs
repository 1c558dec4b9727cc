//! Convenience methods shared by every secret store
//!
//! Text overloads encode and decode UTF-8 around the byte primitives.
//! Single-key overloads use the key as both service and account, so they
//! address the same entries as the two-part form, and they collapse failures
//! into `bool` / `Option` for callers that only want a success signal.

use std::ffi::OsStr;

use crate::payload::{decode_text, encode_text};
use crate::traits::{SecretStore, StoreError};

pub trait SecretStoreExt: SecretStore {
    /// Save text as a new entry
    fn save_text<T: AsRef<OsStr> + ?Sized>(
        &self,
        service: &str,
        account: &str,
        text: &T,
    ) -> Result<(), StoreError> {
        let data = encode_text(text)?;
        self.save(service, account, &data)
    }

    /// Replace the payload of an existing entry with text
    fn update_text<T: AsRef<OsStr> + ?Sized>(
        &self,
        service: &str,
        account: &str,
        text: &T,
    ) -> Result<(), StoreError> {
        let data = encode_text(text)?;
        self.update(service, account, &data)
    }

    /// Load an entry as text
    fn load_text(&self, service: &str, account: &str) -> Result<String, StoreError> {
        decode_text(self.load(service, account)?)
    }

    /// Whether an entry can currently be loaded
    fn contains(&self, service: &str, account: &str) -> bool {
        self.load(service, account).is_ok()
    }

    /// Save under a single key. Returns `false` on any failure.
    fn save_key(&self, key: &str, text: &str) -> bool {
        self.save_text(key, key, text).is_ok()
    }

    /// Update under a single key. Returns `false` on any failure.
    fn update_key(&self, key: &str, text: &str) -> bool {
        self.update_text(key, key, text).is_ok()
    }

    /// Remove under a single key. Returns `false` on any failure.
    fn remove_key(&self, key: &str) -> bool {
        self.remove(key, key).is_ok()
    }

    /// Load under a single key. Any failure yields `None`.
    fn load_key(&self, key: &str) -> Option<String> {
        self.load_text(key, key).ok()
    }
}

impl<S: SecretStore + ?Sized> SecretStoreExt for S {}
