//! Trait definitions for dependency injection
//!
//! Backends implement the primitive operations; every convenience on top of
//! them lives in `SecretStoreExt` and is shared by all backends.

mod secret_store;
mod secret_store_ext;

pub use secret_store::{check_identity, SecretStore, StoreError};
#[cfg(test)]
pub use secret_store::MockSecretStore;
pub use secret_store_ext::SecretStoreExt;
