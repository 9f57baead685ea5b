//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AttemptError, CompletionMessage, CompletionRequest, DomainError};

/// Chat-completion API. One call is exactly one attempt: implementations
/// must not retry, that is the completion service's job.
#[async_trait::async_trait]
pub trait CompletionPort: Send + Sync {
    /// Send the prompt and return the first choice's message as received.
    ///
    /// Status, application-error and malformed-payload cases are mapped to
    /// `AttemptError`. Empty text is NOT an error here; the caller decides.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionMessage, AttemptError>;
}

/// Database reachability check. Used only for the advisory startup ping.
#[async_trait::async_trait]
pub trait DatabaseProbePort: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}
