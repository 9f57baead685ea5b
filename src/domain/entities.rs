//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/reqwest types here; adapters map to and from these.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};

/// Boundary validation run after deserialization. Serde already enforces
/// presence and type; this checks values.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_positive(field: &str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::validation(field, "must be a positive integer"));
    }
    Ok(())
}

fn default_currency() -> String {
    "USD".to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Completion
// ─────────────────────────────────────────────────────────────────────────────

/// One prompt plus generation parameters. Built per call, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    prompt: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl CompletionRequest {
    pub const MAX_TEMPERATURE: f32 = 2.0;

    pub fn new(
        prompt: impl Into<String>,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        require_non_empty("prompt", &prompt)?;
        if !(0.0..=Self::MAX_TEMPERATURE).contains(&temperature) {
            return Err(DomainError::validation(
                "temperature",
                format!("must be within [0, {}]", Self::MAX_TEMPERATURE),
            ));
        }
        if max_output_tokens == 0 {
            return Err(DomainError::validation(
                "max_output_tokens",
                "must be a positive integer",
            ));
        }
        Ok(Self {
            prompt,
            temperature,
            max_output_tokens,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }
}

/// The message object of one upstream answer, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionMessage {
    pub content: Option<String>,
    /// Some reasoning models leave `content` empty and answer here.
    pub reasoning: Option<String>,
}

/// Which field (if any) the returned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Content,
    Reasoning,
    Fallback,
}

/// Successful outcome of the resilient completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub source: AnswerSource,
    /// Attempts used, including the successful one.
    pub attempts: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests (external-facing)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildRequest {
    pub budget: i64,
    pub use_case: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub additional_requirements: Option<String>,
}

impl Validate for BuildRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_positive("budget", self.budget)?;
        require_non_empty("use_case", &self.use_case)?;
        require_non_empty("currency", &self.currency)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Markdown of a build the user is looking at, if any.
    #[serde(default)]
    pub build_context: Option<String>,
}

impl Validate for ChatRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("message", &self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    Build,
    Article,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogRequest {
    pub topic: String,
    pub category: BlogCategory,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub use_case: Option<String>,
}

impl Validate for BlogRequest {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("topic", &self.topic)?;
        if let Some(budget) = self.budget {
            require_positive("budget", budget)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelopes
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResponse {
    pub success: bool,
    pub ai_response: String,
    pub budget: i64,
    pub use_case: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogResponse {
    pub success: bool,
    pub content: String,
    pub topic: String,
    pub category: BlogCategory,
    /// ISO-8601 (RFC 3339) UTC timestamp.
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
