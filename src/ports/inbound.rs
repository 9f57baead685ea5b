//! Inbound port. HTTP handlers (adapter) call into the application.

use crate::domain::{
    BlogRequest, BlogResponse, BuildRequest, BuildResponse, ChatRequest, ChatResponse,
    DomainError,
};

/// Assistant use cases. Requests arrive already validated.
#[async_trait::async_trait]
pub trait AssistantPort: Send + Sync {
    /// Generate a markdown PC-build recommendation.
    async fn generate_build(&self, request: BuildRequest) -> Result<BuildResponse, DomainError>;

    /// Answer a free-form PC-building question, optionally about a given build.
    async fn ask(&self, request: ChatRequest) -> Result<ChatResponse, DomainError>;

    /// Generate a blog post (build guide or article).
    async fn generate_blog(&self, request: BlogRequest) -> Result<BlogResponse, DomainError>;
}
