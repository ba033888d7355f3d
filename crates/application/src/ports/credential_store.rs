//! Credential store port
//!
//! Defines the interface for durable storage of the two session secrets.

use async_trait::async_trait;
use tether_domain::{CredentialSlot, Credentials};

/// Errors that can occur during credential operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The platform secret store rejected the operation.
    #[error("credential backend error: {0}")]
    Backend(String),

    /// A stored value could not be decoded as UTF-8.
    #[error("stored credential for {0} is not valid UTF-8")]
    BadEncoding(CredentialSlot),
}

/// Storage for the access and refresh tokens.
///
/// Implementations must be safe to share between concurrent dispatches:
/// a read never observes a partially written value.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stores `value` in `slot`, replacing what was there.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    async fn save(&self, value: &str, slot: CredentialSlot) -> Result<(), CredentialError>;

    /// Reads the value in `slot`. A missing value is `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn read(&self, slot: CredentialSlot) -> Result<Option<String>, CredentialError>;

    /// Deletes the value in `slot`. Deleting an empty slot succeeds.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    async fn delete(&self, slot: CredentialSlot) -> Result<(), CredentialError>;

    /// Reads the access token.
    async fn access_token(&self) -> Result<Option<String>, CredentialError> {
        self.read(CredentialSlot::AccessToken).await
    }

    /// Reads the refresh token.
    async fn refresh_token(&self) -> Result<Option<String>, CredentialError> {
        self.read(CredentialSlot::RefreshToken).await
    }

    /// Writes both tokens, access token first.
    async fn save_tokens(&self, access: &str, refresh: &str) -> Result<(), CredentialError> {
        self.save(access, CredentialSlot::AccessToken).await?;
        self.save(refresh, CredentialSlot::RefreshToken).await
    }

    /// Reads both slots.
    async fn credentials(&self) -> Result<Credentials, CredentialError> {
        Ok(Credentials {
            access_token: self.access_token().await?,
            refresh_token: self.refresh_token().await?,
        })
    }

    /// Returns true if an access token is stored. Read failures count as
    /// no token.
    async fn has_valid_token(&self) -> bool {
        matches!(self.access_token().await, Ok(Some(_)))
    }

    /// Deletes every slot. All deletions are attempted; the first failure
    /// is returned.
    async fn clear(&self) -> Result<(), CredentialError> {
        let mut first_error = None;
        for slot in CredentialSlot::ALL {
            if let Err(e) = self.delete(slot).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
