//! Credential store adapters.

mod keyring_store;

pub use keyring_store::KeyringCredentialStore;
