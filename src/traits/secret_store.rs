//! Secret storage trait: the four primitive operations every backend provides

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Text could not be encoded as UTF-8")]
    DataEncodingFailed,
    #[error("Stored data is not valid UTF-8")]
    DataDecodingFailed,
    #[error("Save failed: {0}")]
    SaveFailed(String),
    #[error("Update failed: {0}")]
    UpdateFailed(String),
    #[error("Remove failed: {0}")]
    RemoveFailed(String),
    #[error("Load failed: {0}")]
    LoadFailed(String),
}

impl StoreError {
    pub fn save_failed(detail: impl Display) -> Self {
        let err = Self::SaveFailed(detail.to_string());
        tracing::warn!(error = %err, "Secret store error");
        err
    }

    pub fn update_failed(detail: impl Display) -> Self {
        let err = Self::UpdateFailed(detail.to_string());
        tracing::warn!(error = %err, "Secret store error");
        err
    }

    pub fn remove_failed(detail: impl Display) -> Self {
        let err = Self::RemoveFailed(detail.to_string());
        tracing::warn!(error = %err, "Secret store error");
        err
    }

    pub fn load_failed(detail: impl Display) -> Self {
        let err = Self::LoadFailed(detail.to_string());
        tracing::warn!(error = %err, "Secret store error");
        err
    }
}

/// Trait for secret storage keyed by (service, account)
///
/// Production: OS credential store via `keyring` crate
/// Development: plaintext JSON file
/// Testing: In-memory HashMap
///
/// Every call goes straight to the backing store. Implementations keep no
/// cache and take no locks beyond what the store itself needs.
#[cfg_attr(test, mockall::automock)]
pub trait SecretStore: Send + Sync {
    /// Create a new entry. Fails if one already exists for the identity.
    fn save(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Overwrite the payload of an existing entry. Fails if there is none.
    fn update(&self, service: &str, account: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Delete an entry. A missing entry is reported as `RemoveFailed`.
    fn remove(&self, service: &str, account: &str) -> Result<(), StoreError>;

    /// Fetch the payload of exactly one entry
    fn load(&self, service: &str, account: &str) -> Result<Vec<u8>, StoreError>;
}

/// Reject identities with an empty part; returns the reason for the caller's
/// own failure variant.
pub fn check_identity(service: &str, account: &str) -> Result<(), &'static str> {
    if service.is_empty() {
        return Err("service must not be empty");
    }
    if account.is_empty() {
        return Err("account must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_detail() {
        let err = StoreError::save_failed("duplicate item");
        assert_eq!(err.to_string(), "Save failed: duplicate item");

        let err = StoreError::load_failed("item not found");
        assert!(matches!(err, StoreError::LoadFailed(ref m) if m == "item not found"));
    }

    #[test]
    fn test_check_identity() {
        assert!(check_identity("app", "user1").is_ok());
        assert_eq!(check_identity("", "user1"), Err("service must not be empty"));
        assert_eq!(check_identity("app", ""), Err("account must not be empty"));
    }
}
