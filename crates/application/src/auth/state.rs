//! Observable session state: who is signed in, and whether a token is held.

use std::sync::Arc;

use tether_domain::UserProfile;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::SessionEvents;
use crate::ports::{CredentialStore, ProfileCache};

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// The signed-in user, if known.
    pub user: Option<UserProfile>,
    /// Whether an access token is held.
    pub is_authenticated: bool,
}

/// Current user and authentication flag, published over a `watch` channel.
///
/// Cache failures are logged and never surfaced; the in-memory state is
/// always updated.
pub struct SessionState {
    credentials: Arc<dyn CredentialStore>,
    cache: Arc<dyn ProfileCache>,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionState {
    /// Creates a signed-out state.
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, cache: Arc<dyn ProfileCache>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            credentials,
            cache,
            state,
        }
    }

    /// Loads the cached profile, if any, and recomputes the auth flag.
    pub async fn restore(&self) -> SessionSnapshot {
        let user = match self.cache.load().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "failed to load cached profile");
                None
            }
        };
        let is_authenticated = user.is_some() && self.credentials.has_valid_token().await;
        debug!(has_user = user.is_some(), is_authenticated, "session restored");

        let snapshot = SessionSnapshot {
            user,
            is_authenticated,
        };
        self.state.send_replace(snapshot.clone());
        snapshot
    }

    /// Replaces the current user. `Some` is cached, `None` clears the cache
    /// and the auth flag.
    pub async fn set_user(&self, user: Option<UserProfile>) {
        match &user {
            Some(profile) => {
                if let Err(e) = self.cache.store(profile).await {
                    warn!(error = %e, "failed to cache profile");
                }
            }
            None => {
                if let Err(e) = self.cache.clear().await {
                    warn!(error = %e, "failed to clear cached profile");
                }
            }
        }

        let is_authenticated = user.is_some() && self.credentials.has_valid_token().await;
        self.state.send_replace(SessionSnapshot {
            user,
            is_authenticated,
        });
    }

    /// Drops the current user and auth flag after the server rejected the
    /// session. Credentials are left for the sign-out path to clear.
    pub async fn invalidate(&self) {
        info!("session invalidated");
        self.set_user(None).await;
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Current user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.borrow().user.clone()
    }

    /// Whether the session holds a token for a known user.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Spawns a task that invalidates the session on every
    /// [`crate::client::SessionEvent::Unauthorized`].
    ///
    /// The task ends when the event channel closes.
    #[must_use]
    pub fn spawn_invalidation_listener(self: &Arc<Self>, events: &SessionEvents) -> JoinHandle<()> {
        let mut receiver = events.subscribe();
        let state = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        debug!(?event, "invalidating session");
                        state.invalidate().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "session listener lagged");
                        state.invalidate().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
