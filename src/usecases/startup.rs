//! Startup checks. Required environment first, then an advisory database ping.

use crate::domain::DomainError;
use crate::ports::DatabaseProbePort;
use crate::shared::config::AppConfig;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on the advisory ping so a dead database cannot stall startup.
pub const DATABASE_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Fail if a required setting is missing.
pub fn check_environment(cfg: &AppConfig) -> Result<(), DomainError> {
    if !cfg.is_ai_configured() {
        return Err(DomainError::Config(
            "missing required environment variable: OPENROUTER_API_KEY (or PCB_API_KEY)"
                .to_string(),
        ));
    }
    info!(model = %cfg.model_or_default(), url = %cfg.api_url_or_default(), "environment check passed");
    Ok(())
}

/// Ping the database if one is configured. Never fails startup; returns
/// whether the ping succeeded.
pub async fn check_database(probe: Option<&dyn DatabaseProbePort>, timeout: Duration) -> bool {
    let Some(probe) = probe else {
        info!("no database configured, skipping connectivity check");
        return false;
    };

    match tokio::time::timeout(timeout, probe.ping()).await {
        Ok(Ok(())) => {
            info!("database connection successful");
            true
        }
        Ok(Err(e)) => {
            warn!(error = %e, "database connection failed (continuing)");
            false
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis() as u64,
                "database ping timed out (continuing)"
            );
            false
        }
    }
}
