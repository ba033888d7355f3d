//! Typed wrappers over individual API endpoints.

mod user;

pub use user::{PROFILE_PATH, UserRepository};
