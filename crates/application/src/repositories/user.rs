//! User profile endpoint.

use std::sync::Arc;

use tether_domain::{ApiError, RequestDescriptor, UserProfile};

use crate::client::ApiClient;

/// Authenticated profile endpoint.
pub const PROFILE_PATH: &str = "/user/profile";

/// Reads the signed-in user's profile.
pub struct UserRepository {
    client: Arc<ApiClient>,
}

impl UserRepository {
    /// Creates a repository over `client`.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the profile of the user the stored token belongs to.
    ///
    /// # Errors
    /// Returns the dispatch error unchanged.
    pub async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.client.dispatch(&RequestDescriptor::get(PROFILE_PATH)).await
    }
}
