//! HTTP transport port
//!
//! The API client builds fully-resolved wire requests and hands them to a
//! transport; the transport only moves bytes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tether_domain::{Headers, HttpMethod};
use url::Url;

/// A fully-built request, ready to be put on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Final headers, including `Authorization` when attached.
    pub headers: Headers,
    /// JSON-encoded body.
    pub body: Option<Vec<u8>>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|h| h.name.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &header_names)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Raw response: status code and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures where no HTTP response was obtained.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for sending HTTP requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// Any HTTP status, including 4xx and 5xx, is a successful send.
    ///
    /// # Errors
    /// Returns an error only when no response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
