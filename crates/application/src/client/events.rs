//! Session-level broadcast events.

use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast buffer before slow listeners start lagging.
const EVENT_BUFFER: usize = 16;

/// Events published by the API client outside of dispatch results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// A response resolved to 401.
    Unauthorized,
}

/// Fan-out channel for [`SessionEvent`]s.
///
/// Cloning shares the same channel. Every subscriber receives every event
/// published after it subscribed.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Creates a channel with the default buffer size.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_BUFFER);
        Self { sender }
    }

    /// Registers a new independent listener.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event and returns how many listeners received it.
    /// Publishing with no listeners is not an error.
    pub fn publish(&self, event: SessionEvent) -> usize {
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(?event, delivered, "session event published");
        delivered
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
