//! JSON serialization for files written by the adapters.

mod json;

pub use json::*;
