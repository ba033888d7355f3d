//! Sign-in request and response bodies for `POST /account/GenerateToken`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserProfile;

/// Credentials posted to the token endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    /// Account user name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl SignInRequest {
    /// Creates a sign-in request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token endpoint response.
///
/// Expiry timestamps are carried as the server's strings; this client does
/// not track expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Legacy token field, mirrors `access_token`.
    pub token: String,
    /// Bearer token for authenticated calls.
    pub access_token: String,
    /// Access token expiry as sent by the server.
    pub access_token_expire_at: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Refresh token expiry as sent by the server.
    pub refresh_token_expire_at: String,
    /// Profile of the signed-in user.
    pub user_info: UserProfile,
}

impl fmt::Debug for SignInResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInResponse")
            .field("access_token_expire_at", &self.access_token_expire_at)
            .field("refresh_token_expire_at", &self.refresh_token_expire_at)
            .field("user_info", &self.user_info)
            .finish_non_exhaustive()
    }
}
