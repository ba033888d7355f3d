//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building request values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// An environment name is not one of the known deployment targets.
    #[error("unknown environment: {0}")]
    UnknownEnvironment(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
