//! Application use cases. Orchestrate domain logic via ports.

pub mod assistant_service;
pub mod completion_service;
pub mod prompts;
pub mod startup;

pub use assistant_service::AssistantService;
pub use completion_service::{CompletionService, RetryPolicy};
