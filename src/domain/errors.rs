//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Bad request shape or value. Surfaced as 422, never retried.
    #[error("Validation failed for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// Every attempt against the completion service failed.
    /// `reason` is for logs only; the HTTP layer never echoes it.
    #[error("Completion service unavailable after {attempts} attempt(s): {reason}")]
    UpstreamUnavailable { attempts: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure of a single attempt against the completion service.
///
/// Every variant is retryable. What happens after the last attempt depends on
/// the kind: `EmptyAnswer` degrades to the fallback text, the rest become
/// `DomainError::UpstreamUnavailable`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttemptError {
    /// Connection refused, DNS, TLS, client-side timeout.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("attempt timed out after {0} ms")]
    Timeout(u64),

    /// Non-2xx status. `body` is truncated.
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx with an `error` object in the payload.
    #[error("upstream application error: {0}")]
    Api(String),

    /// Undecodable body, or no choices.
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    /// Structurally valid, but neither `content` nor `reasoning` carried text.
    #[error("upstream answer was empty")]
    EmptyAnswer,
}

impl AttemptError {
    pub fn is_empty_answer(&self) -> bool {
        matches!(self, Self::EmptyAnswer)
    }
}
