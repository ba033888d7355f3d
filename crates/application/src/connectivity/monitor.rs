//! Process-wide reachability signal.
//!
//! A single background task polls a [`ReachabilityProbe`] and publishes
//! changes over a `watch` channel. The task is the only writer; any number
//! of readers can check the current state or await changes without
//! blocking it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tether_domain::ConnectivityState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ports::ReachabilityProbe;

/// Observable connectivity state fed by a background probe loop.
pub struct ConnectivityMonitor {
    probe: Arc<dyn ReachabilityProbe>,
    interval: Duration,
    state: Arc<watch::Sender<ConnectivityState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectivityMonitor {
    /// Creates a monitor in the `Unknown` state. Nothing is observed until
    /// [`Self::start_monitoring`] is called.
    #[must_use]
    pub fn new(probe: Arc<dyn ReachabilityProbe>, interval: Duration) -> Self {
        let (state, _) = watch::channel(ConnectivityState::Unknown);
        Self {
            probe,
            interval,
            state: Arc::new(state),
            task: Mutex::new(None),
        }
    }

    /// Starts the background observation task.
    ///
    /// Idempotent: returns `false` if a task is already running. Must be
    /// called from within a Tokio runtime.
    pub fn start_monitoring(&self) -> bool {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return false;
        }

        let probe = Arc::clone(&self.probe);
        let state = Arc::clone(&self.state);
        let interval = self.interval;
        *task = Some(tokio::spawn(async move {
            loop {
                let next = ConnectivityState::from(probe.current_path().await);
                let changed = state.send_if_modified(|current| {
                    if *current == next {
                        false
                    } else {
                        *current = next;
                        true
                    }
                });
                if changed {
                    info!(state = %next, "connectivity changed");
                }
                tokio::time::sleep(interval).await;
            }
        }));
        debug!(interval_ms = interval.as_millis(), "connectivity monitoring started");
        true
    }

    /// Stops the background task. The last published state is kept.
    pub fn stop_monitoring(&self) {
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("connectivity monitoring stopped");
        }
    }

    /// Returns true while the observation task is running.
    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// The most recently published state.
    #[must_use]
    pub fn current_state(&self) -> ConnectivityState {
        *self.state.borrow()
    }

    /// True only when the last observation was a satisfied path.
    /// `Unknown` reads as not connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.current_state().is_connected()
    }

    /// Receiver that yields every published change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state.subscribe()
    }

    /// Resolves once the first observation has been published.
    pub async fn wait_until_known(&self) -> ConnectivityState {
        let mut receiver = self.subscribe();
        let state = receiver
            .wait_for(|state| state.is_known())
            .await
            .map_or(ConnectivityState::Unknown, |state| *state);
        state
    }

    /// Resolves once the state is `Connected`.
    pub async fn wait_until_connected(&self) {
        let mut receiver = self.subscribe();
        let _ = receiver.wait_for(|state| state.is_connected()).await;
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.stop_monitoring();
    }
}
