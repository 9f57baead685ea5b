//! End-to-end HTTP tests: router -> assistant service -> completion service -> mock adapter.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pc_builder_ai::adapters::ai::MockCompletionAdapter;
use pc_builder_ai::adapters::http::{AppState, create_router};
use pc_builder_ai::domain::{AttemptError, CompletionMessage};
use pc_builder_ai::usecases::completion_service::FALLBACK_MESSAGE;
use pc_builder_ai::usecases::{AssistantService, CompletionService, RetryPolicy};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(mock: &Arc<MockCompletionAdapter>) -> Router {
    let completions = Arc::new(CompletionService::new(mock.clone(), RetryPolicy::default()));
    let assistant = Arc::new(AssistantService::new(completions, "pcb-test-20".to_string()));
    create_router(AppState::new(assistant))
}

fn transient() -> Result<CompletionMessage, AttemptError> {
    Err(AttemptError::Status {
        status: 502,
        body: "upstream secret detail".to_string(),
    })
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_fixed_and_idempotent() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let expected = json!({ "status": "healthy", "message": "PC Builder AI API is running" });

    for _ in 0..3 {
        let (status, body) = send(app(&mock), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn root_reports_running() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, body) = send(app(&mock), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "PC Builder AI API is running");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let req = Request::builder()
        .uri("/api/health")
        .header("origin", "https://pcbuilder.example")
        .body(Body::empty())
        .unwrap();
    let resp = app(&mock).oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate build
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_build_relays_answer() {
    let mock = Arc::new(MockCompletionAdapter::scripted(vec![Ok(
        MockCompletionAdapter::content("**CPU**: AMD Ryzen 5 7600 - $199"),
    )]));

    let (status, body) = send(
        app(&mock),
        post_json(
            "/api/generate-build",
            json!({ "budget": 1000, "use_case": "gaming" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["ai_response"].as_str().unwrap().contains("CPU"));
    assert_eq!(body["budget"], 1000);
    assert_eq!(body["use_case"], "gaming");
    assert_eq!(body["currency"], "USD");

    let prompt = &mock.prompts()[0];
    assert!(prompt.contains("1000"));
    assert!(prompt.contains("gaming"));
    assert!(prompt.contains("tag=pcb-test-20"));
}

#[tokio::test]
async fn generate_build_rejects_invalid_shape() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, body) = send(
        app(&mock),
        post_json("/api/generate-build", json!({ "invalid": "data" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_array());
    assert_eq!(body["detail"][0]["loc"][0], "body");
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn generate_build_rejects_non_positive_budget() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, body) = send(
        app(&mock),
        post_json(
            "/api/generate-build",
            json!({ "budget": -5, "use_case": "gaming" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "budget"]));
    assert_eq!(body["detail"][0]["type"], "value_error");
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let req = Request::builder()
        .method("POST")
        .uri("/api/generate-build")
        .header("content-type", "application/json")
        .body(Body::from("{\"budget\": 1000,"))
        .unwrap();
    let (status, body) = send(app(&mock), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
}

// ─────────────────────────────────────────────────────────────────────────────
// Retry bound through HTTP
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn three_transient_failures_return_500() {
    let mock = Arc::new(MockCompletionAdapter::new().with_default(transient()));

    let (status, body) = send(
        app(&mock),
        post_json(
            "/api/generate-build",
            json!({ "budget": 1000, "use_case": "gaming" }),
        ),
    )
    .await;

    assert_eq!(mock.calls(), 3);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "detail": "AI service temporarily unavailable - please try again" })
    );
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test(start_paused = true)]
async fn two_failures_then_success_returns_200() {
    let mock = Arc::new(MockCompletionAdapter::scripted(vec![
        transient(),
        Err(AttemptError::Timeout(60_000)),
        Ok(MockCompletionAdapter::content("Recovered answer")),
    ]));

    let (status, body) = send(
        app(&mock),
        post_json("/api/ask-ai", json!({ "message": "Is 16GB RAM enough?" })),
    )
    .await;

    assert_eq!(mock.calls(), 3);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Recovered answer");
}

// ─────────────────────────────────────────────────────────────────────────────
// Extraction precedence through HTTP
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn content_wins_over_reasoning() {
    let mock = Arc::new(MockCompletionAdapter::scripted(vec![Ok(
        MockCompletionAdapter::message("the content", "the reasoning"),
    )]));
    let (_, body) = send(
        app(&mock),
        post_json("/api/ask-ai", json!({ "message": "hi" })),
    )
    .await;
    assert_eq!(body["response"], "the content");
}

#[tokio::test]
async fn empty_content_falls_back_to_reasoning() {
    let mock = Arc::new(MockCompletionAdapter::scripted(vec![Ok(
        MockCompletionAdapter::message("", "the reasoning"),
    )]));
    let (_, body) = send(
        app(&mock),
        post_json("/api/ask-ai", json!({ "message": "hi" })),
    )
    .await;
    assert_eq!(body["response"], "the reasoning");
}

#[tokio::test(start_paused = true)]
async fn empty_answers_yield_fallback_with_200() {
    let mock = Arc::new(
        MockCompletionAdapter::new().with_default(Ok(MockCompletionAdapter::message(" ", ""))),
    );
    let (status, body) = send(
        app(&mock),
        post_json("/api/ask-ai", json!({ "message": "hi" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.calls(), 3);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], FALLBACK_MESSAGE);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ask AI
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ask_ai_rejects_empty_body() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, body) = send(app(&mock), post_json("/api/ask-ai", json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"][0]["msg"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn ask_ai_uses_build_context_and_echoes_session() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, body) = send(
        app(&mock),
        post_json(
            "/api/ask-ai",
            json!({
                "message": "Will this GPU bottleneck?",
                "session_id": "sess-42",
                "build_context": "**CPU**: Ryzen 5 5600\n**GPU**: RTX 4090"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "sess-42");
    assert!(mock.prompts()[0].contains("RTX 4090"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Generate blog
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_blog_envelope() {
    let mock = Arc::new(MockCompletionAdapter::scripted(vec![Ok(
        MockCompletionAdapter::content("# The $800 Esports Build"),
    )]));
    let (status, body) = send(
        app(&mock),
        post_json(
            "/api/generate-blog",
            json!({ "topic": "Budget esports PC", "category": "build", "budget": 800 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["content"], "# The $800 Esports Build");
    assert_eq!(body["topic"], "Budget esports PC");
    assert_eq!(body["category"], "build");
    let generated_at = body["generated_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(generated_at).is_ok());
}

#[tokio::test]
async fn generate_blog_rejects_unknown_category() {
    let mock = Arc::new(MockCompletionAdapter::new());
    let (status, _) = send(
        app(&mock),
        post_json(
            "/api/generate-blog",
            json!({ "topic": "GPUs", "category": "news" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mock.calls(), 0);
}
