//! Deployment environments and their API origins

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Deployment target, each mapping to a fixed API origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    /// Local development.
    Development,
    /// Pre-release staging.
    Staging,
    /// Production.
    Production,
}

impl AppEnvironment {
    /// The environment selected by the build profile: development for
    /// debug builds, production otherwise.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Base URL every request path is appended to.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Development | Self::Production => "https://crm-api.webase.uz",
            Self::Staging => "https://staging-api.webase.uz",
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl Default for AppEnvironment {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnvironment {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(DomainError::UnknownEnvironment(other.to_string())),
        }
    }
}
