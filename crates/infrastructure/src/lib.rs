//! Tether Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod credentials;
pub mod network;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use credentials::KeyringCredentialStore;
pub use network::TcpReachabilityProbe;
pub use persistence::FileProfileCache;
pub use serialization::{SerializationError, from_json_bytes, to_json_pretty_bytes};
