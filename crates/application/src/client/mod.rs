//! Request dispatch and session-wide events.

mod api_client;
mod events;

pub use api_client::{ApiClient, ApiClientBuilder};
pub use events::{SessionEvent, SessionEvents};
