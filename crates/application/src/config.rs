//! # Client configuration
//!
//! Resolves settings with a clear override hierarchy:
//! build-profile defaults → environment variables → explicit overrides
//! (CLI flags, tests).

use std::time::Duration;

use tether_domain::AppEnvironment;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Default interval between reachability probes.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(5);
/// Default keychain service name.
pub const DEFAULT_KEYRING_SERVICE: &str = "tether";

/// Selects the deployment environment.
pub const ENV_ENVIRONMENT: &str = "TETHER_ENV";
/// Overrides the environment's base URL.
pub const ENV_BASE_URL: &str = "TETHER_BASE_URL";
/// Request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "TETHER_TIMEOUT_SECS";
/// Probe interval in whole seconds.
pub const ENV_PROBE_INTERVAL_SECS: &str = "TETHER_PROBE_INTERVAL_SECS";
/// Keychain service name.
pub const ENV_KEYRING_SERVICE: &str = "TETHER_KEYRING_SERVICE";

/// Resolved settings for one client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Deployment environment.
    pub environment: AppEnvironment,
    /// Origin that request paths are appended to.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Interval between reachability probes.
    pub probe_interval: Duration,
    /// Service name used for keychain entries.
    pub keyring_service: String,
}

impl ClientConfig {
    /// Defaults for a given environment.
    #[must_use]
    pub fn for_environment(environment: AppEnvironment) -> Self {
        Self {
            environment,
            base_url: environment.base_url().to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        }
    }

    /// Resolves configuration from process environment variables.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if any variable holds an unusable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable source.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if any variable holds an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(name) => name.parse()?,
            None => AppEnvironment::current(),
        };

        let mut config = Self::for_environment(environment);

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = parse_secs(ENV_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = lookup(ENV_PROBE_INTERVAL_SECS) {
            config.probe_interval = parse_secs(ENV_PROBE_INTERVAL_SECS, &secs)?;
        }
        if let Some(service) = lookup(ENV_KEYRING_SERVICE) {
            config.keyring_service = service;
        }

        config.validate()?;
        Ok(config)
    }

    /// Switches environment and resets the base URL to its origin.
    #[must_use]
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Overrides the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_base_url(&self.base_url)?;
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: "request_timeout".to_string(),
                value: "0".to_string(),
            });
        }
        if self.probe_interval.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: "probe_interval".to_string(),
                value: "0".to_string(),
            });
        }
        if self.keyring_service.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "keyring_service".to_string(),
                value: self.keyring_service.clone(),
            });
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(AppEnvironment::current())
    }
}

/// Parses `base_url` and requires an absolute http(s) URL with a host.
///
/// # Errors
/// Returns [`ConfigError::InvalidBaseUrl`] otherwise.
pub fn validate_base_url(base_url: &str) -> ConfigResult<Url> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

fn parse_secs(name: &str, value: &str) -> ConfigResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.keyring_service, "tether");
    }

    #[test]
    fn test_environment_selects_origin() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_ENVIRONMENT, "staging")])).unwrap();
        assert_eq!(config.environment, AppEnvironment::Staging);
        assert_eq!(config.base_url, "https://staging-api.webase.uz");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENVIRONMENT, "production"),
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_PROBE_INTERVAL_SECS, "1"),
            (ENV_KEYRING_SERVICE, "tether-test"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.probe_interval, Duration::from_secs(1));
        assert_eq!(config.keyring_service, "tether-test");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_ENVIRONMENT, "qa")])),
            Err(ConfigError::Domain(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])),
            Err(ConfigError::InvalidSetting { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "ftp://example.com")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "not a url")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_with_environment_resets_base_url() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:1")
            .with_environment(AppEnvironment::Staging);
        assert_eq!(config.base_url, AppEnvironment::Staging.base_url());
    }
}
