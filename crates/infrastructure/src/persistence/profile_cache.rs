//! Cached user profile persistence.
//!
//! Stores the last known profile in the platform-specific data directory:
//! - Linux: ~/.local/share/tether/cached_user.json
//! - macOS: ~/Library/Application Support/tether/cached_user.json
//! - Windows: %APPDATA%/tether/cached_user.json

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tether_application::ports::{ProfileCache, ProfileCacheError};
use tether_domain::UserProfile;
use tokio::fs;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_pretty_bytes};

/// File name of the cached profile.
pub const CACHE_FILE_NAME: &str = "cached_user.json";

/// Profile cache backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileProfileCache {
    path: PathBuf,
}

impl FileProfileCache {
    /// Creates a cache at an explicit path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a cache in the platform data directory, if one exists.
    #[must_use]
    pub fn in_data_dir() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// Returns `<data_dir>/tether/cached_user.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("tether").join(CACHE_FILE_NAME))
    }

    /// Path of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileCache for FileProfileCache {
    async fn load(&self) -> Result<Option<UserProfile>, ProfileCacheError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let profile = from_json_bytes(&content)
            .map_err(|e| ProfileCacheError::Serialization(e.to_string()))?;
        Ok(Some(profile))
    }

    async fn store(&self, profile: &UserProfile) -> Result<(), ProfileCacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_pretty_bytes(profile)
            .map_err(|e| ProfileCacheError::Serialization(e.to_string()))?;

        // Readers never see a partially written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), "profile cached");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ProfileCacheError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 3,
            "fullName": "Jane Doe",
            "isAdmin": false,
            "hasSecondUnitOfMeasure": false,
            "isSimpleUser": true,
            "isOrgAdmin": false,
            "isSuperAdmin": false,
        }))
        .unwrap()
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = FileProfileCache::default_path() {
            assert!(path.ends_with("tether/cached_user.json"));
        }
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let cache = FileProfileCache::new(dir.path().join(CACHE_FILE_NAME));
        assert_eq!(cache.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_load_clear() {
        let dir = TempDir::new().unwrap();
        let cache = FileProfileCache::new(dir.path().join("nested").join(CACHE_FILE_NAME));

        cache.store(&profile()).await.unwrap();
        assert_eq!(cache.load().await.unwrap(), Some(profile()));

        cache.clear().await.unwrap();
        assert_eq!(cache.load().await.unwrap(), None);
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);
        std::fs::write(&path, b"{not json").unwrap();

        let cache = FileProfileCache::new(path);
        assert!(matches!(
            cache.load().await,
            Err(ProfileCacheError::Serialization(_))
        ));
    }
}
