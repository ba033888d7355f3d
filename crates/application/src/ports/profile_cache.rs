//! Cached profile port
//!
//! Persists the last known user profile so the UI can show it before the
//! network answers. Stored separately from the credential store.

use async_trait::async_trait;
use tether_domain::UserProfile;

/// Errors that can occur during profile cache operations.
#[derive(Debug, thiserror::Error)]
pub enum ProfileCacheError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository for the cached user profile blob.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Loads the cached profile. Returns `None` if nothing is cached.
    ///
    /// # Errors
    /// Returns an error if the cache exists but cannot be read or decoded.
    async fn load(&self) -> Result<Option<UserProfile>, ProfileCacheError>;

    /// Replaces the cached profile.
    ///
    /// # Errors
    /// Returns an error if the cache cannot be written.
    async fn store(&self, profile: &UserProfile) -> Result<(), ProfileCacheError>;

    /// Removes the cached profile. Clearing an empty cache succeeds.
    ///
    /// # Errors
    /// Returns an error if the cache cannot be removed.
    async fn clear(&self) -> Result<(), ProfileCacheError>;
}
