//! Composition root: builds the dependency graph once per process.

use std::sync::Arc;

use tether_application::{
    ApiClient, AuthSession, ClientConfig, ConnectivityMonitor, CredentialStore, HttpTransport,
    ProfileCache, ReachabilityProbe, SessionEvents, SessionState, UserRepository,
    config::validate_base_url,
};
use tether_infrastructure::{
    FileProfileCache, KeyringCredentialStore, ReqwestTransport, TcpReachabilityProbe,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::AppError;

/// Every service a command may need, wired by constructor injection.
pub struct Services {
    /// Resolved configuration.
    pub config: ClientConfig,
    /// Connectivity monitor shared with the client.
    pub monitor: Arc<ConnectivityMonitor>,
    /// The API client.
    pub client: Arc<ApiClient>,
    /// Sign-in / sign-out facade.
    pub session: AuthSession,
    /// Profile endpoint.
    pub users: UserRepository,
    /// Current user and auth flag.
    pub state: Arc<SessionState>,
    listener: JoinHandle<()>,
}

impl Services {
    /// Production wiring: reqwest, OS keychain, profile file in the data
    /// directory, TCP probe against the API origin.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or an adapter
    /// cannot be created.
    pub fn production(config: ClientConfig) -> Result<Self, AppError> {
        let credentials = Arc::new(KeyringCredentialStore::new(config.keyring_service.clone())?);
        let cache = Arc::new(FileProfileCache::in_data_dir().ok_or(AppError::NoDataDir)?);
        let transport = Arc::new(ReqwestTransport::new()?);
        Self::build(config, transport, credentials, cache)
    }

    /// Wires the services over the given adapters. The reachability probe
    /// always targets the configured origin.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn build(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        cache: Arc<dyn ProfileCache>,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let origin = validate_base_url(&config.base_url)?;
        let probe: Arc<dyn ReachabilityProbe> = Arc::new(
            TcpReachabilityProbe::for_url(&origin)
                .ok_or_else(|| AppError::Unprobeable(config.base_url.clone()))?,
        );

        let monitor = Arc::new(ConnectivityMonitor::new(probe, config.probe_interval));
        let events = SessionEvents::new();
        let client = Arc::new(
            ApiClient::builder()
                .config(&config)
                .transport(transport)
                .credentials(Arc::clone(&credentials))
                .connectivity(Arc::clone(&monitor))
                .events(events.clone())
                .build()?,
        );

        let state = Arc::new(SessionState::new(credentials, cache));
        let listener = state.spawn_invalidation_listener(&events);
        let session = AuthSession::new(Arc::clone(&client)).with_state(Arc::clone(&state));
        let users = UserRepository::new(Arc::clone(&client));

        debug!(environment = %config.environment, base_url = %config.base_url, "services wired");
        Ok(Self {
            config,
            monitor,
            client,
            session,
            users,
            state,
            listener,
        })
    }

    /// Starts connectivity monitoring, restores the cached session and
    /// waits (bounded by the request timeout) for the first reachability
    /// observation.
    pub async fn start(&self) {
        self.monitor.start_monitoring();
        self.state.restore().await;

        let first = tokio::time::timeout(
            self.config.request_timeout,
            self.monitor.wait_until_known(),
        )
        .await;
        match first {
            Ok(state) => info!(%state, "connectivity observed"),
            Err(_) => info!("connectivity still unknown"),
        }
    }
}

impl Drop for Services {
    fn drop(&mut self) {
        self.listener.abort();
        self.monitor.stop_monitoring();
    }
}
