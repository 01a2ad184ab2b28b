//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::error::{NotifyError, RepoError};
use quill_core::ports::{PostRepository, RebuildNotifier};
use quill_core::service::AdminKey;
use quill_core::PostService;
use quill_infra::{HttpWebhookNotifier, InMemoryPostRepository, SqlPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub admin_key: AdminKey,
}

/// Failures that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("post store: {0}")]
    Storage(#[from] RepoError),

    #[error("rebuild webhook: {0}")]
    Webhook(#[from] NotifyError),
}

impl AppState {
    /// Build the application state: connect the store, ensure the schema and
    /// seed post exist, and set up the optional webhook.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let repo: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => {
                Arc::new(SqlPostRepository::connect(db_config, config.row_decode).await?)
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        repo.init_schema().await?;

        let notifier: Option<Arc<dyn RebuildNotifier>> = match &config.webhook {
            Some(webhook) => {
                tracing::info!("Rebuild webhook configured");
                Some(Arc::new(HttpWebhookNotifier::new(
                    webhook.url.clone(),
                    webhook.timeout,
                )?))
            }
            None => None,
        };

        let admin_key = AdminKey::new(config.admin_api_key.clone());
        if !admin_key.is_configured() {
            tracing::warn!("ADMIN_API_KEY not set. All post submissions will be rejected.");
        }

        tracing::info!(settle = ?config.settle, "Application state initialized");

        Ok(Self {
            posts: PostService::new(repo, notifier, config.settle),
            admin_key,
        })
    }
}
