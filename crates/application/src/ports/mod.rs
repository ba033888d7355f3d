//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod credential_store;
mod http_transport;
mod profile_cache;
mod reachability;

pub use credential_store::{CredentialError, CredentialStore};
pub use http_transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
pub use profile_cache::{ProfileCache, ProfileCacheError};
pub use reachability::ReachabilityProbe;
