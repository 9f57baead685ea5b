//! libSQL database probe. Implements DatabaseProbePort with a `SELECT 1`.
//!
//! Nothing is read from or written to the database; the service only reports
//! whether it is reachable at startup.
//! `libsql://` and `http(s)://` URLs open a remote connection, anything else is
//! treated as a local file path (an optional `file:` prefix is stripped).

use crate::domain::DomainError;
use crate::ports::DatabaseProbePort;
use libsql::Database;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Remote { url: String, auth_token: String },
    Local { path: String },
}

impl Target {
    fn parse(url: &str, auth_token: Option<String>) -> Self {
        let url = url.trim();
        let is_remote = ["libsql://", "http://", "https://", "ws://", "wss://"]
            .iter()
            .any(|scheme| url.starts_with(scheme));
        if is_remote {
            Target::Remote {
                url: url.to_string(),
                auth_token: auth_token.unwrap_or_default(),
            }
        } else {
            Target::Local {
                path: url.strip_prefix("file:").unwrap_or(url).to_string(),
            }
        }
    }
}

/// Probe for a libSQL/SQLite database.
pub struct LibsqlProbe {
    target: Target,
}

impl LibsqlProbe {
    /// # Arguments
    /// * `url` - `libsql://...` / `https://...` URL or a local file path
    /// * `auth_token` - Token for remote databases (ignored for local files)
    pub fn new(url: &str, auth_token: Option<String>) -> Self {
        Self {
            target: Target::parse(url, auth_token),
        }
    }

    async fn open(&self) -> Result<Database, DomainError> {
        let built = match &self.target {
            Target::Remote { url, auth_token } => {
                libsql::Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
            Target::Local { path } => libsql::Builder::new_local(path.as_str()).build().await,
        };
        built.map_err(|e| DomainError::Database(format!("open failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl DatabaseProbePort for LibsqlProbe {
    async fn ping(&self) -> Result<(), DomainError> {
        let db = self.open().await?;
        let conn = db
            .connect()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = conn
            .query("SELECT 1", ())
            .await
            .map_err(|e| DomainError::Database(format!("ping failed: {}", e)))?;
        // Drain so the statement completes.
        while rows
            .next()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .is_some()
        {}
        debug!(db = ?self.target, "database ping ok");
        Ok(())
    }
}
