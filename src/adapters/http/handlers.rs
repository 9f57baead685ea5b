//! Route handlers. Thin: extract, call the assistant port, wrap, map errors.

use super::error::ApiError;
use super::extract::ValidatedJson;
use super::router::AppState;
use crate::domain::{
    BlogRequest, BlogResponse, BuildRequest, BuildResponse, ChatRequest, ChatResponse,
    HealthResponse,
};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

pub const SERVICE_MESSAGE: &str = "PC Builder AI API is running";

pub async fn root() -> Json<Value> {
    Json(json!({ "message": SERVICE_MESSAGE }))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: SERVICE_MESSAGE.to_string(),
    })
}

pub async fn generate_build(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BuildRequest>,
) -> Result<Json<BuildResponse>, ApiError> {
    state
        .assistant
        .generate_build(request)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain("generate_build", e))
}

pub async fn ask_ai(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    state
        .assistant
        .ask(request)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain("ask_ai", e))
}

pub async fn generate_blog(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BlogRequest>,
) -> Result<Json<BlogResponse>, ApiError> {
    state
        .assistant
        .generate_blog(request)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain("generate_blog", e))
}
