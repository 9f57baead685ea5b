//! Mock completion adapter for testing without API calls.
//!
//! Plays back a script of per-attempt outcomes and counts calls, so retry
//! behaviour can be asserted exactly.

use crate::domain::{AttemptError, CompletionMessage, CompletionRequest};
use crate::ports::CompletionPort;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

/// Mock completion adapter.
///
/// Each call pops the next scripted outcome. Once the script is exhausted the
/// default outcome is returned (a canned markdown answer unless overridden).
pub struct MockCompletionAdapter {
    script: Mutex<VecDeque<Result<CompletionMessage, AttemptError>>>,
    default: Result<CompletionMessage, AttemptError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    /// Simulated network delay.
    delay: Duration,
}

impl MockCompletionAdapter {
    /// Create a mock that always answers with canned content.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default: Ok(Self::content(
                "[MOCK] **CPU**: AMD Ryzen 5 7600 - $199\n*Reason: strong value for gaming*",
            )),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Create a mock that plays `outcomes` in order, then repeats the default.
    pub fn scripted(outcomes: Vec<Result<CompletionMessage, AttemptError>>) -> Self {
        let mock = Self::new();
        *mock.script.lock().unwrap_or_else(|p| p.into_inner()) = outcomes.into();
        mock
    }

    /// Outcome returned once the script runs out.
    pub fn with_default(mut self, outcome: Result<CompletionMessage, AttemptError>) -> Self {
        self.default = outcome;
        self
    }

    /// Sleep this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Message with only `content` set.
    pub fn content(text: &str) -> CompletionMessage {
        CompletionMessage {
            content: Some(text.to_string()),
            reasoning: None,
        }
    }

    /// Message with both fields set.
    pub fn message(content: &str, reasoning: &str) -> CompletionMessage {
        CompletionMessage {
            content: Some(content.to_string()),
            reasoning: Some(reasoning.to_string()),
        }
    }

    /// Number of attempts observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Default for MockCompletionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionPort for MockCompletionAdapter {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionMessage, AttemptError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            call,
            prompt_len = request.prompt().len(),
            "[MOCK] simulating completion"
        );
        self.prompts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request.prompt().to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self
            .script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front();
        next.unwrap_or_else(|| self.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_plays_script_then_default() {
        let mock = MockCompletionAdapter::scripted(vec![
            Err(AttemptError::Timeout(10)),
            Ok(MockCompletionAdapter::content("first")),
        ]);
        let req = CompletionRequest::new("prompt", 0.7, 16).unwrap();

        assert_eq!(mock.complete(&req).await, Err(AttemptError::Timeout(10)));
        assert_eq!(
            mock.complete(&req).await.unwrap().content.as_deref(),
            Some("first")
        );
        let fallback = mock.complete(&req).await.unwrap();
        assert!(fallback.content.unwrap().contains("CPU"));
        assert_eq!(mock.calls(), 3);
        assert_eq!(mock.prompts(), vec!["prompt"; 3]);
    }
}
