//! Wiring & DI. Entry point: load config, run startup checks, build adapters,
//! inject into services, serve HTTP. No business logic here.

use dotenv::dotenv;
use pc_builder_ai::adapters::ai::OpenRouterAdapter;
use pc_builder_ai::adapters::http::{AppState, create_router};
use pc_builder_ai::adapters::persistence::LibsqlProbe;
use pc_builder_ai::ports::{AssistantPort, CompletionPort, DatabaseProbePort};
use pc_builder_ai::shared::config::AppConfig;
use pc_builder_ai::usecases::completion_service::{
    ATTEMPT_TIMEOUT, MAX_ATTEMPTS, RETRY_DELAY,
};
use pc_builder_ai::usecases::startup::{self, DATABASE_PING_TIMEOUT};
use pc_builder_ai::usecases::{AssistantService, CompletionService, RetryPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    info!("starting PC Builder AI backend");
    let cfg = AppConfig::load()?;

    // --- Startup checks: required env aborts, database ping is advisory ---
    startup::check_environment(&cfg).map_err(|e| anyhow::anyhow!("{}", e))?;
    let probe: Option<LibsqlProbe> = cfg
        .database_url()
        .map(|url| LibsqlProbe::new(&url, cfg.database_auth_token.clone()));
    startup::check_database(
        probe.as_ref().map(|p| p as &dyn DatabaseProbePort),
        DATABASE_PING_TIMEOUT,
    )
    .await;
    info!("startup checks completed");

    // --- Retry policy (named defaults, env overrides) ---
    let policy = RetryPolicy::new(
        cfg.max_attempts.unwrap_or(MAX_ATTEMPTS),
        cfg.retry_delay().unwrap_or(RETRY_DELAY),
        cfg.attempt_timeout().unwrap_or(ATTEMPT_TIMEOUT),
    );
    info!(
        max_attempts = policy.max_attempts,
        retry_delay_ms = policy.retry_delay.as_millis() as u64,
        attempt_timeout_ms = policy.attempt_timeout.as_millis() as u64,
        "completion retry policy"
    );

    // --- Completion adapter ---
    let adapter = OpenRouterAdapter::new(
        cfg.api_url_or_default(),
        cfg.api_key().unwrap_or_default(),
        cfg.model_or_default(),
        policy.attempt_timeout,
    )
    .map_err(|e| anyhow::anyhow!("HTTP client build failed: {}", e))?
    .with_attribution(cfg.http_referer_or_default(), cfg.app_title_or_default());
    info!(
        model = %adapter.model(),
        url = %cfg.api_url_or_default(),
        "completion adapter ready"
    );
    let completion_port: Arc<dyn CompletionPort> = Arc::new(adapter);

    // --- Services ---
    let completions = Arc::new(CompletionService::new(completion_port, policy));
    let assistant: Arc<dyn AssistantPort> = Arc::new(AssistantService::new(
        completions,
        cfg.affiliate_tag_or_default(),
    ));

    // --- HTTP ---
    let app = create_router(AppState::new(assistant));
    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {} failed: {}", addr, e))?;
    info!(addr = %addr, "PC Builder AI API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Keep serving; only an explicit signal stops the server.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
