//! Network reachability types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw path status reported by a reachability observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStatus {
    /// A usable route to the network exists.
    Satisfied,
    /// No usable route.
    Unsatisfied,
    /// A route could exist once a connection is brought up (e.g. dial-up
    /// or a VPN on demand). Treated as unreachable.
    RequiresConnection,
}

/// Process-wide reachability as seen by the API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// The last observation was a satisfied path.
    Connected,
    /// The last observation was anything other than a satisfied path.
    Disconnected,
    /// No observation has arrived yet.
    #[default]
    Unknown,
}

impl ConnectivityState {
    /// Returns true only for [`ConnectivityState::Connected`].
    ///
    /// `Unknown` counts as not connected.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns true once at least one observation has been recorded.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<PathStatus> for ConnectivityState {
    fn from(status: PathStatus) -> Self {
        match status {
            PathStatus::Satisfied => Self::Connected,
            PathStatus::Unsatisfied | PathStatus::RequiresConnection => Self::Disconnected,
        }
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_only_satisfied_is_connected() {
        assert_eq!(
            ConnectivityState::from(PathStatus::Satisfied),
            ConnectivityState::Connected
        );
        assert_eq!(
            ConnectivityState::from(PathStatus::Unsatisfied),
            ConnectivityState::Disconnected
        );
        assert_eq!(
            ConnectivityState::from(PathStatus::RequiresConnection),
            ConnectivityState::Disconnected
        );
    }

    #[test]
    fn test_unknown_fails_closed() {
        let state = ConnectivityState::default();
        assert_eq!(state, ConnectivityState::Unknown);
        assert!(!state.is_connected());
        assert!(!state.is_known());
    }
}
