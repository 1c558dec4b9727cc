//! Production implementations of traits

mod dev_file_store;
mod keychain_store;
mod status;

pub use dev_file_store::DevFileSecretStore;
pub use keychain_store::KeychainSecretStore;
pub use status::StoreStatus;
