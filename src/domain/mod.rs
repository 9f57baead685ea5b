//! Core domain layer. No external I/O dependencies.
//!
//! Entities, boundary validation and the error taxonomy live here.

pub mod entities;
pub mod errors;

pub use entities::{
    AnswerSource, BlogCategory, BlogRequest, BlogResponse, BuildRequest, BuildResponse,
    ChatRequest, ChatResponse, Completion, CompletionMessage, CompletionRequest, HealthResponse,
    Validate,
};
pub use errors::{AttemptError, DomainError};
