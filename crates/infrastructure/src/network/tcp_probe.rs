//! Reachability probe that opens a TCP connection to the API origin.

use std::time::Duration;

use async_trait::async_trait;
use tether_application::ports::ReachabilityProbe;
use tether_domain::PathStatus;
use tokio::net::TcpStream;
use tracing::trace;
use url::Url;

/// Default bound on one connection attempt.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Reports `Satisfied` when a TCP connection to `host:port` succeeds within
/// the connect timeout, `Unsatisfied` otherwise.
#[derive(Debug, Clone)]
pub struct TcpReachabilityProbe {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpReachabilityProbe {
    /// Creates a probe for an explicit address.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Creates a probe for the host and port of `url`. Returns `None` if
    /// the URL has no host or no known default port.
    #[must_use]
    pub fn for_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        let port = url.port_or_known_default()?;
        Some(Self::new(host, port))
    }

    /// Overrides the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Probed `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[async_trait]
impl ReachabilityProbe for TcpReachabilityProbe {
    async fn current_path(&self) -> PathStatus {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match tokio::time::timeout(self.connect_timeout, connect).await {
            Ok(Ok(_)) => PathStatus::Satisfied,
            Ok(Err(e)) => {
                trace!(address = %self.address(), error = %e, "probe connect failed");
                PathStatus::Unsatisfied
            }
            Err(_) => {
                trace!(address = %self.address(), "probe connect timed out");
                PathStatus::Unsatisfied
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::net::TcpListener;

    #[test]
    fn test_for_url_uses_default_port() {
        let url = Url::parse("https://api.example.com/v1").unwrap();
        let probe = TcpReachabilityProbe::for_url(&url).unwrap();
        assert_eq!(probe.address(), "api.example.com:443");

        let url = Url::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            TcpReachabilityProbe::for_url(&url).unwrap().address(),
            "127.0.0.1:8080"
        );
    }

    #[tokio::test]
    async fn test_listening_port_is_satisfied() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let probe = TcpReachabilityProbe::new("127.0.0.1", port);
        assert_eq!(probe.current_path().await, PathStatus::Satisfied);
    }

    #[tokio::test]
    async fn test_closed_port_is_unsatisfied() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = TcpReachabilityProbe::new("127.0.0.1", port)
            .with_connect_timeout(Duration::from_millis(500));
        assert_eq!(probe.current_path().await, PathStatus::Unsatisfied);
    }
}
