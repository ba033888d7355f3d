//! Authentication for the API client.
//!
//! This module provides:
//! - The sign-in / sign-out facade
//! - Observable session state (current user + auth flag)
//! - In-memory credential storage

mod memory_store;
mod session;
mod state;

pub use memory_store::InMemoryCredentialStore;
pub use session::{AuthSession, SIGN_IN_PATH};
pub use state::{SessionSnapshot, SessionState};
