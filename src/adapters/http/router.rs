//! Router and shared state.

use super::handlers;
use crate::ports::AssistantPort;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<dyn AssistantPort>,
}

impl AppState {
    pub fn new(assistant: Arc<dyn AssistantPort>) -> Self {
        Self { assistant }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health_check))
        .route("/api/generate-build", post(handlers::generate_build))
        .route("/api/ask-ai", post(handlers::ask_ai))
        .route("/api/generate-blog", post(handlers::generate_blog))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
