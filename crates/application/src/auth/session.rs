//! Sign-in / sign-out facade over the API client and credential store.

use std::sync::Arc;

use tether_domain::{ApiError, RequestDescriptor, SignInRequest, SignInResponse, UserProfile};
use tracing::{error, info, warn};

use super::SessionState;
use crate::client::ApiClient;
use crate::ports::CredentialStore;

/// Token endpoint.
pub const SIGN_IN_PATH: &str = "/account/GenerateToken";

/// Signs users in and out.
///
/// Both tokens are persisted before [`Self::sign_in`] returns, so a
/// dispatch awaited after it always carries the new access token.
pub struct AuthSession {
    client: Arc<ApiClient>,
    state: Option<Arc<SessionState>>,
}

impl AuthSession {
    /// Creates a facade that only manages credentials.
    #[must_use]
    pub const fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: None,
        }
    }

    /// Also keeps `state` in step with sign-in and sign-out.
    #[must_use]
    pub fn with_state(mut self, state: Arc<SessionState>) -> Self {
        self.state = Some(state);
        self
    }

    fn credentials(&self) -> &Arc<dyn CredentialStore> {
        self.client.credentials()
    }

    /// Exchanges a user name and password for tokens.
    ///
    /// # Errors
    /// Returns the dispatch error, or [`ApiError::Unknown`] if the tokens
    /// could not be stored. In the latter case no partial credentials are
    /// left behind.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        info!(username, "signing in");
        let descriptor = RequestDescriptor::post(SIGN_IN_PATH)
            .with_json(&SignInRequest::new(username, password))
            .map_err(|e| {
                error!(error = %e, "failed to encode sign-in request");
                ApiError::Unknown
            })?
            .with_auth(false);

        let response: SignInResponse = self.client.dispatch(&descriptor).await.inspect_err(|e| {
            warn!(username, error = %e, "sign-in failed");
        })?;

        if let Err(e) = self
            .credentials()
            .save_tokens(&response.access_token, &response.refresh_token)
            .await
        {
            error!(error = %e, "failed to store tokens");
            if let Err(e) = self.credentials().clear().await {
                warn!(error = %e, "failed to roll back partial credentials");
            }
            return Err(ApiError::Unknown);
        }

        let user = response.user_info;
        if let Some(state) = &self.state {
            state.set_user(Some(user.clone())).await;
        }
        info!(user = user.display_name(), "signed in");
        Ok(user)
    }

    /// Clears both credential slots and the session user.
    ///
    /// Always succeeds locally; storage failures are only logged.
    pub async fn sign_out(&self) {
        if let Err(e) = self.credentials().clear().await {
            warn!(error = %e, "failed to clear credentials");
        }
        if let Some(state) = &self.state {
            state.set_user(None).await;
        }
        info!("signed out");
    }

    /// Whether an access token is stored.
    pub async fn has_valid_token(&self) -> bool {
        self.credentials().has_valid_token().await
    }

    /// The attached session state, if any.
    #[must_use]
    pub const fn state(&self) -> Option<&Arc<SessionState>> {
        self.state.as_ref()
    }
}
