//! Application error types

use thiserror::Error;
use tether_domain::DomainError;

/// Construction-time configuration errors.
///
/// These surface when the service graph is assembled, never from inside a
/// request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required collaborator was not supplied to a builder.
    #[error("missing required component: {0}")]
    MissingComponent(&'static str),

    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A setting has an unusable value.
    #[error("invalid value for {name}: '{value}'")]
    InvalidSetting {
        /// Setting name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
