//! Credential slots and values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named slot in the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSlot {
    /// Bearer token attached to authenticated requests.
    AccessToken,
    /// Token used to obtain a new access token.
    RefreshToken,
}

impl CredentialSlot {
    /// Every slot, in a stable order.
    pub const ALL: [Self; 2] = [Self::AccessToken, Self::RefreshToken];

    /// Stable storage key for this slot.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for CredentialSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Snapshot of both stored secrets.
///
/// No expiry is tracked: a present access token is the only
/// "authenticated" signal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Access token, if signed in.
    pub access_token: Option<String>,
    /// Refresh token, if signed in.
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Returns true if an access token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys_are_distinct() {
        assert_ne!(
            CredentialSlot::AccessToken.key(),
            CredentialSlot::RefreshToken.key()
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials {
            access_token: Some("secret-access".to_string()),
            refresh_token: None,
        };
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("secret-access"));
        assert!(debug.contains("<redacted>"));
        assert!(credentials.is_authenticated());
    }
}
