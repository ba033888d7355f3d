//! Tether Application - Services and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for credential storage, HTTP, reachability and
//!   the profile cache)
//! - The connectivity monitor, API client and session services
//! - Client configuration and its error type

pub mod auth;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod ports;
pub mod repositories;

#[cfg(test)]
mod test_support;

pub use auth::{AuthSession, InMemoryCredentialStore, SessionSnapshot, SessionState};
pub use client::{ApiClient, ApiClientBuilder, SessionEvent, SessionEvents};
pub use config::ClientConfig;
pub use connectivity::ConnectivityMonitor;
pub use error::{ConfigError, ConfigResult};
pub use ports::{
    CredentialError, CredentialStore, HttpRequest, HttpResponse, HttpTransport, ProfileCache,
    ProfileCacheError, ReachabilityProbe, TransportError,
};
pub use repositories::UserRepository;
