//! Authenticated API client.
//!
//! Turns a [`RequestDescriptor`] into a wire request, sends it through an
//! [`HttpTransport`], and classifies the outcome into a typed value or an
//! [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tether_domain::{ApiError, Headers, RequestDescriptor};
use tracing::{debug, error, warn};
use url::Url;

use super::events::{SessionEvent, SessionEvents};
use crate::config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT, validate_base_url};
use crate::connectivity::ConnectivityMonitor;
use crate::error::{ConfigError, ConfigResult};
use crate::ports::{CredentialStore, HttpRequest, HttpResponse, HttpTransport};

const JSON: &str = "application/json";

/// Dispatches typed requests against one API origin.
///
/// Failures are terminal for the call: there is no retry. Every failure
/// maps to exactly one [`ApiError`] variant.
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialStore>,
    connectivity: Arc<ConnectivityMonitor>,
    events: SessionEvents,
}

impl ApiClient {
    /// Starts building a client.
    #[must_use]
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Sends `descriptor` and decodes a 2xx body as `T`.
    ///
    /// 1. Fails with [`ApiError::NoConnection`] without touching the network
    ///    if the connectivity monitor does not report `Connected`.
    /// 2. Builds the URL, headers and JSON body.
    /// 3. Sends within the configured timeout.
    /// 4. Classifies the status; a 401 also publishes
    ///    [`SessionEvent::Unauthorized`].
    ///
    /// # Errors
    /// Returns the [`ApiError`] the outcome classifies as.
    pub async fn dispatch<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ApiError> {
        let response = self.execute(descriptor).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            error!(
                error = %e,
                body = %String::from_utf8_lossy(&response.body),
                "failed to decode response"
            );
            ApiError::DecodingError
        })
    }

    /// Like [`Self::dispatch`] but discards the body of a 2xx response.
    ///
    /// # Errors
    /// Returns the [`ApiError`] the outcome classifies as.
    pub async fn dispatch_empty(&self, descriptor: &RequestDescriptor) -> Result<(), ApiError> {
        self.execute(descriptor).await.map(|_| ())
    }

    /// Runs the gate, build, send and status classification steps.
    async fn execute(&self, descriptor: &RequestDescriptor) -> Result<HttpResponse, ApiError> {
        if !self.connectivity.is_connected() {
            warn!(
                state = %self.connectivity.current_state(),
                path = descriptor.path(),
                "not connected, request not sent"
            );
            return Err(ApiError::NoConnection);
        }

        let request = self.build_request(descriptor).await?;
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.send(request).await?;
        debug!(status = response.status, path = descriptor.path(), "response received");

        if let Some(api_error) = ApiError::from_response(response.status, &response.body) {
            error!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "request failed"
            );
            if api_error.is_unauthorized() {
                self.events.publish(SessionEvent::Unauthorized);
            }
            return Err(api_error);
        }

        Ok(response)
    }

    /// Builds the wire request for a descriptor.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidUrl`] if the URL cannot be formed and
    /// [`ApiError::Unknown`] if the body cannot be encoded.
    pub async fn build_request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<HttpRequest, ApiError> {
        let url = self.build_url(descriptor)?;
        let headers = self.build_headers(descriptor).await;
        let body = descriptor
            .body()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| {
                error!(error = %e, "failed to encode request body");
                ApiError::Unknown
            })?;

        Ok(HttpRequest {
            method: descriptor.method(),
            url,
            headers,
            body,
            timeout: self.timeout,
        })
    }

    /// Base URL + path, then the query parameters in order.
    fn build_url(&self, descriptor: &RequestDescriptor) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base_url, descriptor.path());
        let mut url = Url::parse(&raw).map_err(|e| {
            error!(url = %raw, error = %e, "failed to build URL");
            ApiError::InvalidUrl
        })?;

        if !descriptor.query().is_empty() {
            url.query_pairs_mut().extend_pairs(descriptor.query().pairs());
        }
        Ok(url)
    }

    async fn build_headers(&self, descriptor: &RequestDescriptor) -> Headers {
        let mut headers = descriptor.headers().clone();
        headers.set("Content-Type", JSON);
        headers.set("Accept", JSON);

        if descriptor.requires_auth() {
            match self.credentials.access_token().await {
                Ok(Some(token)) => headers.set("Authorization", format!("Bearer {token}")),
                Ok(None) => {
                    headers.remove("Authorization");
                }
                Err(e) => {
                    warn!(error = %e, "could not read access token, sending without it");
                    headers.remove("Authorization");
                }
            }
        }
        headers
    }

    /// Waits for connectivity and sends, all within one timeout window.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let attempt = async {
            self.connectivity.wait_until_connected().await;
            self.transport.send(request).await
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                warn!(error = %e, "transport failure");
                Err(ApiError::Unknown)
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis(), "request timed out");
                Err(ApiError::Unknown)
            }
        }
    }

    /// Origin request paths are appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Credential store used for the `Authorization` header.
    #[must_use]
    pub const fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Connectivity monitor consulted before each dispatch.
    #[must_use]
    pub const fn connectivity(&self) -> &Arc<ConnectivityMonitor> {
        &self.connectivity
    }

    /// Channel the `Unauthorized` broadcast is published on.
    #[must_use]
    pub const fn events(&self) -> &SessionEvents {
        &self.events
    }
}

/// Builder for [`ApiClient`]. Every collaborator is required except the
/// event channel, which defaults to a fresh one.
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn HttpTransport>>,
    credentials: Option<Arc<dyn CredentialStore>>,
    connectivity: Option<Arc<ConnectivityMonitor>>,
    events: Option<SessionEvents>,
}

impl ApiClientBuilder {
    /// Takes base URL and timeout from a resolved config.
    #[must_use]
    pub fn config(mut self, config: &ClientConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = Some(config.request_timeout);
        self
    }

    /// Sets the API origin.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the per-request timeout (default 30 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the credential store.
    #[must_use]
    pub fn credentials(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the connectivity monitor.
    #[must_use]
    pub fn connectivity(mut self, connectivity: Arc<ConnectivityMonitor>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Shares an existing event channel.
    #[must_use]
    pub fn events(mut self, events: SessionEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingComponent`] for a missing collaborator,
    /// [`ConfigError::InvalidBaseUrl`] for an unusable origin and
    /// [`ConfigError::InvalidSetting`] for a zero timeout.
    pub fn build(self) -> ConfigResult<ApiClient> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingComponent("base_url"))?;
        validate_base_url(&base_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::InvalidSetting {
                name: "timeout".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            transport: self
                .transport
                .ok_or(ConfigError::MissingComponent("transport"))?,
            credentials: self
                .credentials
                .ok_or(ConfigError::MissingComponent("credentials"))?,
            connectivity: self
                .connectivity
                .ok_or(ConfigError::MissingComponent("connectivity"))?,
            events: self.events.unwrap_or_default(),
        })
    }
}
