//! In-memory credential storage.
//!
//! Used by tests and by hosts that must not persist secrets. Values live
//! only as long as the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tether_domain::CredentialSlot;
use tokio::sync::RwLock;

use crate::ports::{CredentialError, CredentialStore};

/// Thread-safe in-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    slots: Arc<RwLock<HashMap<CredentialSlot, String>>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds both tokens.
    #[must_use]
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let slots = HashMap::from([
            (CredentialSlot::AccessToken, access.to_string()),
            (CredentialSlot::RefreshToken, refresh.to_string()),
        ]);
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn save(&self, value: &str, slot: CredentialSlot) -> Result<(), CredentialError> {
        let mut slots = self.slots.write().await;
        slots.insert(slot, value.to_string());
        Ok(())
    }

    async fn read(&self, slot: CredentialSlot) -> Result<Option<String>, CredentialError> {
        let slots = self.slots.read().await;
        Ok(slots.get(&slot).cloned())
    }

    async fn delete(&self, slot: CredentialSlot) -> Result<(), CredentialError> {
        let mut slots = self.slots.write().await;
        slots.remove(&slot);
        Ok(())
    }
}
