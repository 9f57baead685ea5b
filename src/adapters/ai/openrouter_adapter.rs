//! OpenRouter (OpenAI-compatible) chat-completions adapter.
//!
//! Implements `CompletionPort`: one HTTP call per invocation, every failure
//! mapped to an `AttemptError`. Retries live in the completion service.

use crate::domain::{AttemptError, CompletionMessage, CompletionRequest};
use crate::ports::CompletionPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest upstream error body kept in an `AttemptError`.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// OpenRouter chat-completions adapter.
///
/// Works against any OpenAI-compatible endpoint; the attribution headers are
/// simply ignored by providers that do not use them.
pub struct OpenRouterAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    http_referer: String,
    app_title: String,
}

impl OpenRouterAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - Chat-completions endpoint (e.g. "https://openrouter.ai/api/v1/chat/completions")
    /// * `api_key` - Bearer token
    /// * `model` - Model identifier (e.g. "deepseek/deepseek-chat")
    /// * `timeout` - Client-side timeout for a single request
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
            http_referer: crate::shared::config::DEFAULT_HTTP_REFERER.to_string(),
            app_title: crate::shared::config::DEFAULT_APP_TITLE.to_string(),
        })
    }

    /// Override the `HTTP-Referer` / `X-Title` attribution headers.
    pub fn with_attribution(mut self, http_referer: String, app_title: String) -> Self {
        self.http_referer = http_referer;
        self.app_title = app_title;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt().to_string(),
            }],
            temperature: request.temperature(),
            max_tokens: request.max_output_tokens(),
        }
    }

    /// Map a decoded 2xx payload to the first choice's message.
    fn extract_message(response: ChatResponse) -> Result<CompletionMessage, AttemptError> {
        if let Some(err) = response.error {
            return Err(AttemptError::Api(err.describe()));
        }

        let choice = response
            .choices
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| AttemptError::Malformed("no choices in response".to_string()))?;

        let message = choice
            .message
            .ok_or_else(|| AttemptError::Malformed("choice has no message".to_string()))?;

        Ok(CompletionMessage {
            content: message.content,
            reasoning: message.reasoning,
        })
    }
}

fn truncate(text: &str) -> String {
    text.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

/// OpenAI-style request body.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI-style response body. Everything optional: the shape varies by model.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl ApiErrorBody {
    fn describe(&self) -> String {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match &self.code {
            Some(code) => format!("{} (code {})", message, code),
            None => message.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionPort for OpenRouterAdapter {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionMessage, AttemptError> {
        debug!(
            model = %self.model,
            prompt_len = request.prompt().len(),
            "sending prompt to completion API"
        );

        let body = self.build_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.http_referer)
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %truncate(&text), "completion API returned error status");
            return Err(AttemptError::Status {
                status: status.as_u16(),
                body: truncate(&text),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AttemptError::Transport(format!("reading body: {}", e)))?;
        let decoded: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AttemptError::Malformed(format!("{}: {}", e, truncate(&text))))?;

        Self::extract_message(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<CompletionMessage, AttemptError> {
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        OpenRouterAdapter::extract_message(response)
    }

    #[test]
    fn test_extract_content_and_reasoning() {
        let msg = decode(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi","reasoning":"think"}}]}"#,
        )
        .unwrap();
        assert_eq!(msg.content.as_deref(), Some("Hi"));
        assert_eq!(msg.reasoning.as_deref(), Some("think"));
    }

    #[test]
    fn test_null_content_is_kept_as_none() {
        let msg = decode(r#"{"choices":[{"message":{"content":null,"reasoning":"r"}}]}"#).unwrap();
        assert_eq!(msg.content, None);
        assert_eq!(msg.reasoning.as_deref(), Some("r"));
    }

    #[test]
    fn test_error_payload_is_api_error() {
        let err = decode(r#"{"error":{"message":"Rate limit exceeded","code":429}}"#).unwrap_err();
        assert_eq!(
            err,
            AttemptError::Api("Rate limit exceeded (code 429)".to_string())
        );
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        assert!(matches!(decode(r#"{"id":"x"}"#), Err(AttemptError::Malformed(_))));
        assert!(matches!(
            decode(r#"{"choices":[]}"#),
            Err(AttemptError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let adapter = OpenRouterAdapter::new(
            "http://localhost".to_string(),
            "key".to_string(),
            "deepseek/deepseek-chat".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        let req = CompletionRequest::new("Build me a PC", 0.7, 2048).unwrap();
        let body = serde_json::to_value(adapter.build_request(&req)).unwrap();
        assert_eq!(body["model"], "deepseek/deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Build me a PC");
        assert_eq!(body["max_tokens"], 2048);
    }
}
