//! OS keychain credential store.
//!
//! Each slot is one keychain entry under a shared service name, with the
//! slot key (`access_token` / `refresh_token`) as the entry's user. The
//! platform stores are blocking, so every call runs on tokio's blocking
//! pool.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use keyring::Entry;
use tether_application::ports::{CredentialError, CredentialStore};
use tether_domain::CredentialSlot;
use tracing::debug;

/// The two keychain entries, resolved once per store.
struct SlotEntries {
    access: Entry,
    refresh: Entry,
}

impl SlotEntries {
    const fn get(&self, slot: CredentialSlot) -> &Entry {
        match slot {
            CredentialSlot::AccessToken => &self.access,
            CredentialSlot::RefreshToken => &self.refresh,
        }
    }
}

/// Credential store backed by the platform keychain.
#[derive(Clone)]
pub struct KeyringCredentialStore {
    service: String,
    entries: Arc<SlotEntries>,
}

impl KeyringCredentialStore {
    /// Creates a store whose entries live under `service`.
    ///
    /// # Errors
    /// Returns [`CredentialError::Backend`] if the platform store rejects
    /// the entry names.
    pub fn new(service: impl Into<String>) -> Result<Self, CredentialError> {
        let service = service.into();
        let entry = |slot: CredentialSlot| {
            Entry::new(&service, slot.key()).map_err(|e| map_error(&e, slot))
        };
        let entries = SlotEntries {
            access: entry(CredentialSlot::AccessToken)?,
            refresh: entry(CredentialSlot::RefreshToken)?,
        };
        Ok(Self {
            service,
            entries: Arc::new(entries),
        })
    }

    /// Service name the entries are filed under.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Runs a keychain operation for `slot` on the blocking pool.
    async fn with_entry<T, F>(&self, slot: CredentialSlot, op: F) -> Result<T, CredentialError>
    where
        T: Send + 'static,
        F: FnOnce(&Entry) -> Result<T, CredentialError> + Send + 'static,
    {
        let entries = Arc::clone(&self.entries);
        tokio::task::spawn_blocking(move || op(entries.get(slot)))
            .await
            .map_err(|e| CredentialError::Backend(format!("keychain task failed: {e}")))?
    }
}

impl fmt::Debug for KeyringCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyringCredentialStore")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

fn map_error(error: &keyring::Error, slot: CredentialSlot) -> CredentialError {
    match error {
        keyring::Error::BadEncoding(_) => CredentialError::BadEncoding(slot),
        other => CredentialError::Backend(other.to_string()),
    }
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn save(&self, value: &str, slot: CredentialSlot) -> Result<(), CredentialError> {
        let value = value.to_string();
        self.with_entry(slot, move |entry| {
            entry.set_password(&value).map_err(|e| map_error(&e, slot))
        })
        .await?;
        debug!(%slot, "credential saved");
        Ok(())
    }

    async fn read(&self, slot: CredentialSlot) -> Result<Option<String>, CredentialError> {
        self.with_entry(slot, move |entry| match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_error(&e, slot)),
        })
        .await
    }

    async fn delete(&self, slot: CredentialSlot) -> Result<(), CredentialError> {
        self.with_entry(slot, move |entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_error(&e, slot)),
        })
        .await?;
        debug!(%slot, "credential deleted");
        Ok(())
    }
}
