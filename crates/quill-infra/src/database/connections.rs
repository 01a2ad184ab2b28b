use std::fmt;
use std::time::Duration;

use quill_core::error::RepoError;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

const REDACTED: &str = "***";

/// Configuration for the post database.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Credential for hosted databases. Applied as the connection password.
    pub auth_token: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            max_connections: 10,
            min_connections: 1,
        }
    }

    /// A private SQLite database living in a single pooled connection.
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            ..Self::new("sqlite::memory:")
        }
    }

    /// URL scheme, e.g. `sqlite` or `postgres`.
    pub fn scheme(&self) -> &str {
        self.url.split_once(':').map_or("", |(scheme, _)| scheme)
    }

    /// Fails when no compiled-in driver can open this URL. Checked before the
    /// token is applied, so the error never carries credentials.
    pub fn ensure_driver(&self) -> Result<(), RepoError> {
        let available = match self.scheme() {
            "sqlite" => cfg!(feature = "sqlite"),
            "postgres" | "postgresql" => cfg!(feature = "postgres"),
            _ => false,
        };
        if available {
            Ok(())
        } else {
            Err(RepoError::Unsupported(format!(
                "no driver for `{}://` URLs (use a sqlite or postgres URL)",
                self.scheme()
            )))
        }
    }

    /// Masks the auth token, raw or percent-encoded, in a driver message.
    pub fn redact(&self, message: &str) -> String {
        let Some(token) = self.auth_token.as_deref().filter(|t| !t.is_empty()) else {
            return message.to_string();
        };

        let encoded = url::Url::parse(&self.connection_url())
            .ok()
            .and_then(|u| u.password().map(str::to_owned));

        let mut redacted = message.replace(token, REDACTED);
        if let Some(encoded) = encoded.filter(|e| !e.is_empty()) {
            redacted = redacted.replace(&encoded, REDACTED);
        }
        redacted
    }

    /// The URL handed to the driver, with the auth token filled in as password
    /// when the URL has a host and no password of its own.
    pub fn connection_url(&self) -> String {
        let Some(token) = self.auth_token.as_deref() else {
            return self.url.clone();
        };

        match url::Url::parse(&self.url) {
            Ok(mut parsed) if parsed.has_host() && parsed.password().is_none() => {
                match parsed.set_password(Some(token)) {
                    Ok(()) => parsed.to_string(),
                    Err(()) => self.url.clone(),
                }
            }
            _ => {
                tracing::debug!("Database URL takes no password, auth token not applied");
                self.url.clone()
            }
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| REDACTED))
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

/// Open the connection pool shared by every request.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let opts = ConnectOptions::new(config.connection_url())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .to_owned();

    let conn = Database::connect(opts).await?;
    tracing::info!(
        backend = ?conn.get_database_backend(),
        pool = config.max_connections,
        "Database connected"
    );

    Ok(conn)
}
