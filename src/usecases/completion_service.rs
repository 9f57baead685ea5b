//! Resilient completion client.
//!
//! Wraps one `CompletionPort` with a bounded retry loop, a per-attempt
//! timeout and content-or-reasoning answer extraction.
//!
//! Per call: `Attempting(1) -> Success | Retryable -> Attempting(n+1) | Terminal`,
//! terminal once `n == max_attempts`. When the last attempt produced an empty
//! answer the call still succeeds with [`FALLBACK_MESSAGE`].

use crate::domain::{
    AnswerSource, AttemptError, Completion, CompletionMessage, CompletionRequest, DomainError,
};
use crate::ports::CompletionPort;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Attempts per call, including the first.
pub const MAX_ATTEMPTS: usize = 3;
/// Fixed pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);
/// Wall-clock bound on a single attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Returned with 200 when the upstream keeps answering with nothing.
pub const FALLBACK_MESSAGE: &str = "I apologize, but I couldn't generate a response. Please try again with a different question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub retry_delay: Duration,
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    /// `max_attempts` below 1 is raised to 1.
    pub fn new(max_attempts: usize, retry_delay: Duration, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
            attempt_timeout,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, RETRY_DELAY, ATTEMPT_TIMEOUT)
    }
}

/// Pick the answer text out of an upstream message.
///
/// `content` wins when it has any non-whitespace text and is returned as
/// received. Otherwise a non-blank `reasoning` is used.
pub fn extract_answer(message: &CompletionMessage) -> Option<(String, AnswerSource)> {
    let non_blank = |field: &Option<String>| {
        field
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    };

    if let Some(content) = non_blank(&message.content) {
        return Some((content, AnswerSource::Content));
    }
    non_blank(&message.reasoning).map(|reasoning| (reasoning, AnswerSource::Reasoning))
}

/// Completion client with bounded retries. Holds no per-call state and is
/// shared across requests behind an `Arc`.
pub struct CompletionService {
    port: Arc<dyn CompletionPort>,
    policy: RetryPolicy,
}

impl CompletionService {
    pub fn new(port: Arc<dyn CompletionPort>, policy: RetryPolicy) -> Self {
        Self { port, policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Obtain generated text for `request`.
    ///
    /// # Errors
    /// `DomainError::UpstreamUnavailable` when the last attempt failed with a
    /// transport, timeout, status, application or payload error.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<Completion, DomainError> {
        let max = self.policy.max_attempts;
        let mut last_error = AttemptError::EmptyAnswer;

        for attempt in 1..=max {
            info!(
                attempt,
                max_attempts = max,
                prompt_len = request.prompt().len(),
                "calling completion API"
            );

            match self.attempt(request).await {
                Ok((text, source)) => {
                    info!(attempt, source = ?source, text_len = text.len(), "completion succeeded");
                    return Ok(Completion {
                        text,
                        source,
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    warn!(attempt, max_attempts = max, error = %e, "completion attempt failed");
                    last_error = e;
                }
            }

            if attempt < max {
                tokio::time::sleep(self.policy.retry_delay).await;
            }
        }

        if last_error.is_empty_answer() {
            warn!(attempts = max, "no usable answer after all attempts, returning fallback");
            return Ok(Completion {
                text: FALLBACK_MESSAGE.to_string(),
                source: AnswerSource::Fallback,
                attempts: max,
            });
        }

        Err(DomainError::UpstreamUnavailable {
            attempts: max,
            reason: last_error.to_string(),
        })
    }

    /// One bounded attempt: call, then extract.
    async fn attempt(
        &self,
        request: &CompletionRequest,
    ) -> Result<(String, AnswerSource), AttemptError> {
        let timeout = self.policy.attempt_timeout;
        let message = tokio::time::timeout(timeout, self.port.complete(request))
            .await
            .map_err(|_| AttemptError::Timeout(timeout.as_millis() as u64))??;
        extract_answer(&message).ok_or(AttemptError::EmptyAnswer)
    }
}
