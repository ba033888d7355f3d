//! Request descriptor: an immutable description of one intended API call.

use serde::Serialize;

use super::{Headers, HttpMethod, QueryParam, QueryParams};
use crate::error::{DomainError, DomainResult};

/// Describes one API call: path, verb, optional JSON body, query, extra
/// headers, and whether the stored bearer token should be attached.
///
/// Built by the caller with the `with_*` methods and then handed to the
/// API client by reference. There are no setters once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    path: String,
    method: HttpMethod,
    body: Option<serde_json::Value>,
    query: QueryParams,
    headers: Headers,
    requires_auth: bool,
}

impl RequestDescriptor {
    /// Creates an authenticated `GET` descriptor for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            body: None,
            query: QueryParams::new(),
            headers: Headers::new(),
            requires_auth: true,
        }
    }

    /// Shorthand for a `GET` descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// Shorthand for a `POST` descriptor.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Post)
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Serializes `body` to JSON and attaches it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> DomainResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Sets an extra header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Marks whether the stored access token should be attached.
    #[must_use]
    pub const fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Request path, appended verbatim to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Caller-supplied headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Whether the bearer token should be attached.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}
