//! Fakes shared by the unit tests in this crate.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tether_domain::{PathStatus, UserProfile};

use crate::connectivity::ConnectivityMonitor;
use crate::ports::{
    HttpRequest, HttpResponse, HttpTransport, ProfileCache, ProfileCacheError, ReachabilityProbe,
    TransportError,
};

/// Probe whose answer the test controls.
pub struct ScriptedProbe {
    status: Mutex<PathStatus>,
}

impl ScriptedProbe {
    pub fn arc(status: PathStatus) -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(status),
        })
    }

    pub fn set(&self, status: PathStatus) {
        *self.status.lock().unwrap() = status;
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn current_path(&self) -> PathStatus {
        *self.status.lock().unwrap()
    }
}

/// Monitor that has already observed `status`.
pub async fn monitor_with(status: PathStatus) -> Arc<ConnectivityMonitor> {
    let monitor = Arc::new(ConnectivityMonitor::new(
        ScriptedProbe::arc(status),
        Duration::from_millis(5),
    ));
    monitor.start_monitoring();
    monitor.wait_until_known().await;
    monitor
}

/// Transport that replays queued outcomes and records every request.
#[derive(Default)]
pub struct FakeTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Option<Duration>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.as_bytes())));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

/// Profile cache kept in memory.
#[derive(Default)]
pub struct MemoryProfileCache {
    profile: Mutex<Option<UserProfile>>,
    fail_writes: bool,
}

impl MemoryProfileCache {
    pub fn holding(profile: UserProfile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            profile: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn current(&self) -> Option<UserProfile> {
        self.profile.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileCache for MemoryProfileCache {
    async fn load(&self) -> Result<Option<UserProfile>, ProfileCacheError> {
        Ok(self.current())
    }

    async fn store(&self, profile: &UserProfile) -> Result<(), ProfileCacheError> {
        if self.fail_writes {
            return Err(ProfileCacheError::Serialization("read-only".to_string()));
        }
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ProfileCacheError> {
        *self.profile.lock().unwrap() = None;
        Ok(())
    }
}

/// Minimal profile with the required flags set.
pub fn profile(full_name: &str) -> UserProfile {
    serde_json::from_value(serde_json::json!({
        "fullName": full_name,
        "isAdmin": false,
        "hasSecondUnitOfMeasure": false,
        "isSimpleUser": true,
        "isOrgAdmin": false,
        "isSuperAdmin": false,
    }))
    .unwrap()
}
