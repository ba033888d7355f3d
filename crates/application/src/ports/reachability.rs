//! Reachability probe port

use async_trait::async_trait;
use tether_domain::PathStatus;

/// Source of network path observations for the connectivity monitor.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Observes the current network path.
    async fn current_path(&self) -> PathStatus;
}
