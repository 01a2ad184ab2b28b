//! In-memory post repository - used as fallback when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, Post, seed_post};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

/// Post repository holding everything in a `Vec` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn init_schema(&self) -> Result<(), RepoError> {
        let seed = seed_post();
        let mut posts = self.posts.write().await;
        if !posts.iter().any(|p| p.id == seed.id) {
            posts.insert(0, seed);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn insert(&self, post: &NewPost) -> Result<i64, RepoError> {
        let mut posts = self.posts.write().await;
        // Ids only grow: nothing is ever deleted.
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        posts.push(post.clone().into_post(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
