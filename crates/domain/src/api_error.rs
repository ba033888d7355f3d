//! API error taxonomy and server error body parsing.
//!
//! Every failed dispatch resolves to exactly one [`ApiError`] variant. The
//! `Display` output of each variant is a message meant to be shown to the
//! user as-is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message used for a 400 response whose body yields nothing usable.
pub const VALIDATION_FALLBACK_MESSAGE: &str = "The request was rejected by the server";

/// Closed set of failures an API call can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The descriptor could not be turned into a well-formed URL.
    #[error("Invalid URL")]
    InvalidUrl,

    /// The connectivity gate failed before any network attempt.
    #[error("No internet connection")]
    NoConnection,

    /// A 2xx body did not match the expected type.
    #[error("Failed to process server response")]
    DecodingError,

    /// HTTP 401.
    #[error("Session expired. Please sign in again")]
    Unauthorized,

    /// HTTP 403.
    #[error("Access denied")]
    Forbidden,

    /// HTTP 404.
    #[error("Resource not found")]
    NotFound,

    /// HTTP 400, with the server-provided or fallback message.
    #[error("{0}")]
    ValidationError(String),

    /// HTTP 5xx, with the server-provided or fallback message.
    #[error("{0}")]
    ServerError(String),

    /// Transport failure or an unclassified status code.
    #[error("An unexpected error occurred")]
    Unknown,
}

impl ApiError {
    /// Classifies an HTTP outcome.
    ///
    /// Returns `None` for 2xx statuses. For 400 and 5xx the body is parsed
    /// as a [`ServerErrorBody`]; if that fails or yields no message, a
    /// fallback keyed by the status code is used.
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Option<Self> {
        let error = match status {
            200..=299 => return None,
            400 => Self::ValidationError(ServerErrorBody::message_for(status, body)),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::ServerError(ServerErrorBody::message_for(status, body)),
            _ => Self::Unknown,
        };
        Some(error)
    }

    /// Human-readable message suitable for direct display.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true for the variant that should invalidate the session.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Fallback message for a status code whose error body was unusable.
#[must_use]
pub fn fallback_message(status: u16) -> String {
    match status {
        400 => VALIDATION_FALLBACK_MESSAGE.to_string(),
        _ => format!("Server error: {status}"),
    }
}

/// Structured error body returned by the API for validation and server
/// failures.
///
/// ```json
/// {
///   "errors": { "username": ["required"], "password": ["too short"] },
///   "title": "One or more validation errors occurred.",
///   "status": 400,
///   "traceId": "00-abc-01"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerErrorBody {
    /// Field name to messages, in the order the server sent them.
    #[serde(default)]
    pub errors: Option<IndexMap<String, Vec<String>>>,
    /// Short summary of the problem.
    #[serde(default)]
    pub title: Option<String>,
    /// Status code echoed by the server.
    #[serde(default)]
    pub status: Option<i64>,
    /// Server-side correlation identifier.
    #[serde(default)]
    pub trace_id: Option<String>,
}

impl ServerErrorBody {
    /// Parses an error body, returning `None` if it is not this shape.
    #[must_use]
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Derives a display message.
    ///
    /// All `errors` values are flattened in map order and joined with
    /// `". "`. If that is empty, a non-empty `title` is used.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let joined = self
            .errors
            .iter()
            .flat_map(|errors| errors.values())
            .flatten()
            .filter(|m| !m.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(". ");
        if !joined.is_empty() {
            return Some(joined);
        }

        self.title.clone().filter(|t| !t.is_empty())
    }

    /// Message for `status` derived from a raw body, with fallback.
    #[must_use]
    pub fn message_for(status: u16, body: &[u8]) -> String {
        Self::parse(body)
            .and_then(|parsed| parsed.message())
            .unwrap_or_else(|| fallback_message(status))
    }
}
