//! Rebuild webhook - an empty POST to a deploy hook URL (Cloudflare Pages, Netlify, ...).

use std::time::Duration;

use async_trait::async_trait;

use quill_core::error::NotifyError;
use quill_core::ports::RebuildNotifier;

/// Sends a single empty-bodied POST per notification. No retries.
pub struct HttpWebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl HttpWebhookNotifier {
    pub fn new(url: String, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self { url, client })
    }
}

#[async_trait]
impl RebuildNotifier for HttpWebhookNotifier {
    async fn notify(&self) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .body("")
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Webhook responded");

        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }
        Ok(())
    }
}
