//! Application configuration loaded from environment variables.
//!
//! Most settings can be spelled two ways: flat (`ADMIN_API_KEY`) or nested
//! (`AdminApiKey`, `Cloudflare__WebhookUrl`) as produced by hierarchical
//! config sources. The first non-blank value wins.

use std::env;
use std::time::Duration;

use quill_core::SettlePolicy;
use quill_infra::{DatabaseConfig, DecodePolicy};

/// Lower bound for the confirm-write poll interval.
const MIN_SETTLE_POLL: Duration = Duration::from_millis(10);

/// Outbound rebuild webhook settings.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub timeout: Duration,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub row_decode: DecodePolicy,
    pub admin_api_key: Option<String>,
    pub webhook: Option<WebhookConfig>,
    pub settle: SettlePolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |keys: &[&str]| {
            keys.iter()
                .copied()
                .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()))
        };
        let parse_or = |key: &str, default: u64| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let database = get(&["DATABASE_URL", "Turso__Url"]).map(|url| DatabaseConfig {
            url,
            auth_token: get(&["DATABASE_AUTH_TOKEN", "Turso__AuthToken"]),
            max_connections: parse_or("DB_MAX_CONNECTIONS", 10) as u32,
            min_connections: parse_or("DB_MIN_CONNECTIONS", 1) as u32,
        });

        let webhook = get(&["CLOUDFLARE_WEBHOOK_URL", "Cloudflare__WebhookUrl"]).map(|url| {
            WebhookConfig {
                url,
                timeout: Duration::from_secs(parse_or("WEBHOOK_TIMEOUT_SECS", 10)),
            }
        });

        let settle = match get(&["SETTLE_MODE"]).as_deref().map(str::to_lowercase).as_deref() {
            Some("confirm") => SettlePolicy::ConfirmWrite {
                timeout: Duration::from_millis(parse_or("SETTLE_TIMEOUT_MS", 5000)),
                interval: Duration::from_millis(parse_or("SETTLE_POLL_MS", 250)).max(MIN_SETTLE_POLL),
            },
            _ => SettlePolicy::FixedDelay(Duration::from_millis(parse_or("SETTLE_DELAY_MS", 2000))),
        };

        let row_decode = match get(&["ROW_DECODE"]).map(|v| v.to_lowercase()).as_deref() {
            Some("strict") => DecodePolicy::Strict,
            _ => DecodePolicy::Coerce,
        };

        Self {
            host: get(&["HOST"]).unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            row_decode,
            admin_api_key: get(&["ADMIN_API_KEY", "AdminApiKey"]),
            webhook,
            settle,
        }
    }
}
