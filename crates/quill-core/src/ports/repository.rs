use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Durable post storage.
///
/// Implementations are shared across all in-flight requests and must be safe for
/// concurrent use without external locking.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create the posts table if absent and insert the seed post if absent.
    ///
    /// Must be idempotent across repeated calls and restarts.
    async fn init_schema(&self) -> Result<(), RepoError>;

    /// All posts in store default order.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Persist a post and return the id assigned by the store.
    async fn insert(&self, post: &NewPost) -> Result<i64, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
