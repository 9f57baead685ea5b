//! Assistant service. Turns validated requests into prompts, runs them through
//! the resilient completion client and wraps the text in response envelopes.

use crate::domain::{
    BlogRequest, BlogResponse, BuildRequest, BuildResponse, ChatRequest, ChatResponse,
    CompletionRequest, DomainError,
};
use crate::ports::AssistantPort;
use crate::usecases::completion_service::CompletionService;
use crate::usecases::prompts;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Blog posts run longer than build lists and answers.
const BLOG_MAX_TOKENS: u32 = 3000;

pub struct AssistantService {
    completions: Arc<CompletionService>,
    affiliate_tag: String,
}

impl AssistantService {
    /// # Arguments
    /// * `completions` - Resilient completion client
    /// * `affiliate_tag` - Tag appended to generated Amazon links
    pub fn new(completions: Arc<CompletionService>, affiliate_tag: String) -> Self {
        Self {
            completions,
            affiliate_tag,
        }
    }

    async fn generate(&self, prompt: String, max_tokens: u32) -> Result<String, DomainError> {
        let request = CompletionRequest::new(prompt, DEFAULT_TEMPERATURE, max_tokens)?;
        let completion = self.completions.complete(&request).await?;
        Ok(completion.text)
    }
}

#[async_trait::async_trait]
impl AssistantPort for AssistantService {
    async fn generate_build(&self, request: BuildRequest) -> Result<BuildResponse, DomainError> {
        info!(
            budget = request.budget,
            use_case = %request.use_case,
            currency = %request.currency,
            "generating PC build"
        );
        let prompt = prompts::build_prompt(&request, &self.affiliate_tag);
        let ai_response = self.generate(prompt, DEFAULT_MAX_TOKENS).await?;

        Ok(BuildResponse {
            success: true,
            ai_response,
            budget: request.budget,
            use_case: request.use_case,
            currency: request.currency,
        })
    }

    async fn ask(&self, request: ChatRequest) -> Result<ChatResponse, DomainError> {
        info!(
            session_id = request.session_id.as_deref().unwrap_or("-"),
            has_build_context = request.build_context.is_some(),
            "answering question"
        );
        let prompt = prompts::chat_prompt(&request);
        let response = self.generate(prompt, DEFAULT_MAX_TOKENS).await?;

        Ok(ChatResponse {
            success: true,
            response,
            session_id: request.session_id,
        })
    }

    async fn generate_blog(&self, request: BlogRequest) -> Result<BlogResponse, DomainError> {
        info!(topic = %request.topic, category = ?request.category, "generating blog post");
        let prompt = prompts::blog_prompt(&request, &self.affiliate_tag);
        let content = self.generate(prompt, BLOG_MAX_TOKENS).await?;

        Ok(BlogResponse {
            success: true,
            content,
            topic: request.topic,
            category: request.category,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}
