//! Tether Domain - Core value types
//!
//! This crate defines the value types of the Tether API client: request
//! descriptors, the API error taxonomy, connectivity states, credential
//! slots and the account payloads exchanged with the server.
//! All types here are pure Rust with no I/O dependencies.

pub mod api_error;
pub mod app_environment;
pub mod auth;
pub mod connectivity;
pub mod credentials;
pub mod error;
pub mod request;

pub use api_error::{ApiError, ServerErrorBody, VALIDATION_FALLBACK_MESSAGE, fallback_message};
pub use app_environment::AppEnvironment;
pub use auth::{DeviceToken, SignInRequest, SignInResponse, UserProfile};
pub use connectivity::{ConnectivityState, PathStatus};
pub use credentials::{CredentialSlot, Credentials};
pub use error::{DomainError, DomainResult};
pub use request::{Header, Headers, HttpMethod, QueryParam, QueryParams, RequestDescriptor};
