//! HTTP adapter (axum). Drives the inbound AssistantPort.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::{AppState, create_router};
