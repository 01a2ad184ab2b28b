use async_trait::async_trait;

use crate::error::NotifyError;

/// Informs an external build pipeline that content changed.
#[async_trait]
pub trait RebuildNotifier: Send + Sync {
    /// Fire a single rebuild request. No retries.
    async fn notify(&self) -> Result<(), NotifyError>;
}
