//! Application configuration. Upstream credentials, retry policy, bind address.

use serde::Deserialize;
use std::time::Duration;

/// Default OpenRouter chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";
pub const DEFAULT_AFFILIATE_TAG: &str = "your-affiliate-tag";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8001;
/// Attribution headers sent to OpenRouter.
pub const DEFAULT_HTTP_REFERER: &str = "https://pcbuilderai.emergent.com";
pub const DEFAULT_APP_TITLE: &str = "PC Builder AI";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    // ─────────────────────────────────────────────────────────────────────────
    // Upstream completion API
    // ─────────────────────────────────────────────────────────────────────────
    /// OpenRouter API key. Read from PCB_API_KEY or OPENROUTER_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions URL. Read from PCB_API_URL.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Upstream model identifier. Read from PCB_MODEL.
    #[serde(default)]
    pub model: Option<String>,

    /// Read from PCB_HTTP_REFERER.
    #[serde(default)]
    pub http_referer: Option<String>,

    /// Read from PCB_APP_TITLE.
    #[serde(default)]
    pub app_title: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Retry policy
    // ─────────────────────────────────────────────────────────────────────────
    /// Attempts per completion call (default 3). Read from PCB_MAX_ATTEMPTS.
    #[serde(default)]
    pub max_attempts: Option<usize>,

    /// Fixed delay between attempts in ms (default 2000). Read from PCB_RETRY_DELAY_MS.
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,

    /// Per-attempt timeout in seconds (default 60). Read from PCB_ATTEMPT_TIMEOUT_SECS.
    #[serde(default)]
    pub attempt_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Prompt templating
    // ─────────────────────────────────────────────────────────────────────────
    /// Amazon affiliate tag appended to purchase links. Read from PCB_AFFILIATE_TAG or AFFILIATE_TAG_AMAZON.
    #[serde(default)]
    pub affiliate_tag: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Database (startup ping only)
    // ─────────────────────────────────────────────────────────────────────────
    /// libSQL URL or local file path. Read from PCB_DATABASE_URL or DATABASE_URL.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Auth token for remote libSQL. Read from PCB_DATABASE_AUTH_TOKEN.
    #[serde(default)]
    pub database_auth_token: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Bind address
    // ─────────────────────────────────────────────────────────────────────────
    /// Read from PCB_HOST or HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Read from PCB_PORT or PORT.
    #[serde(default)]
    pub port: Option<u16>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PCB"));
        if let Ok(path) = std::env::var("PCB_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Unprefixed names are what existing deployments' .env files use.
        if cfg.api_key.is_none() {
            cfg.api_key = non_empty_env("OPENROUTER_API_KEY");
        }
        if cfg.affiliate_tag.is_none() {
            cfg.affiliate_tag = non_empty_env("AFFILIATE_TAG_AMAZON");
        }
        if cfg.database_url.is_none() {
            cfg.database_url = non_empty_env("DATABASE_URL");
        }
        if cfg.host.is_none() {
            cfg.host = non_empty_env("HOST");
        }
        if cfg.port.is_none() {
            if let Some(port) = non_empty_env("PORT").and_then(|s| s.parse::<u16>().ok()) {
                cfg.port = Some(port);
            }
        }
        Ok(cfg)
    }

    /// Returns the upstream API key if configured and non-blank.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }

    /// Returns true if the upstream API key is present.
    pub fn is_ai_configured(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn http_referer_or_default(&self) -> String {
        self.http_referer
            .clone()
            .unwrap_or_else(|| DEFAULT_HTTP_REFERER.to_string())
    }

    pub fn app_title_or_default(&self) -> String {
        self.app_title
            .clone()
            .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string())
    }

    pub fn affiliate_tag_or_default(&self) -> String {
        self.affiliate_tag
            .clone()
            .unwrap_or_else(|| DEFAULT_AFFILIATE_TAG.to_string())
    }

    /// Database URL, if configured.
    pub fn database_url(&self) -> Option<String> {
        self.database_url.clone().filter(|u| !u.trim().is_empty())
    }

    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host_or_default(), self.port_or_default())
    }

    /// Explicit retry delay override, if any.
    pub fn retry_delay(&self) -> Option<Duration> {
        self.retry_delay_ms.map(Duration::from_millis)
    }

    /// Explicit per-attempt timeout override, if any.
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_secs.map(Duration::from_secs)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
