//! Errors surfaced by the command line front end.

use tether_application::{ConfigError, CredentialError, TransportError};
use tether_domain::ApiError;

/// Anything that ends a command with a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API call failed. Displays the user-facing message.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// The HTTP client could not be created.
    #[error("could not create HTTP client: {0}")]
    Transport(#[from] TransportError),

    /// The platform keychain could not be opened.
    #[error("could not open the credential store: {0}")]
    Credentials(#[from] CredentialError),

    /// No platform data directory for the profile cache.
    #[error("could not determine the user data directory")]
    NoDataDir,

    /// The base URL has no host to probe.
    #[error("cannot probe reachability of {0}")]
    Unprobeable(String),

    /// `sign-in` without `--password` or `TETHER_PASSWORD`.
    #[error("no password given; pass --password or set TETHER_PASSWORD")]
    MissingPassword,

    /// Output could not be rendered.
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}
