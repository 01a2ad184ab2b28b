//! Post listing and the publish flow.
//!
//! Publishing runs in a fixed order: validate, persist, settle, notify.
//! Nothing after a failed step runs, and a failed notification never fails the publish.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{PostRepository, RebuildNotifier};

/// How long to wait between persisting a post and notifying the build pipeline.
///
/// The store may be replicated with eventual consistency, so the pipeline could
/// otherwise re-read a replica that has not seen the new row yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Sleep for a fixed interval.
    FixedDelay(Duration),
    /// Poll the store until the new post is readable or `timeout` elapses.
    /// A timeout is logged and the notification is sent anyway.
    ConfirmWrite { timeout: Duration, interval: Duration },
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::FixedDelay(Duration::from_secs(2))
    }
}

/// What happened to the rebuild notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No webhook configured.
    Skipped,
    Sent,
    /// The call failed and was ignored.
    Failed,
}

/// A successfully persisted post.
#[derive(Debug, Clone)]
pub struct Published {
    pub post: Post,
    pub notify: NotifyOutcome,
}

/// Post use cases, composed over the repository and the optional notifier.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    notifier: Option<Arc<dyn RebuildNotifier>>,
    settle: SettlePolicy,
}

impl PostService {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        notifier: Option<Arc<dyn RebuildNotifier>>,
        settle: SettlePolicy,
    ) -> Self {
        Self {
            repo,
            notifier,
            settle,
        }
    }

    pub fn repository(&self) -> &Arc<dyn PostRepository> {
        &self.repo
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list().await?)
    }

    /// Validate and persist a post, then trigger a rebuild.
    ///
    /// Validation and storage failures are returned before any later step runs.
    pub async fn publish(
        &self,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Published, DomainError> {
        let new_post = NewPost::new(title, content)?;

        let id = self.repo.insert(&new_post).await?;
        tracing::info!(post_id = id, "Post persisted");

        self.settle(id).await;
        let notify = self.notify().await;

        Ok(Published {
            post: new_post.into_post(id),
            notify,
        })
    }

    async fn settle(&self, id: i64) {
        match self.settle {
            SettlePolicy::FixedDelay(delay) => sleep(delay).await,
            SettlePolicy::ConfirmWrite { timeout, interval } => {
                let deadline = Instant::now() + timeout;
                loop {
                    match self.repo.find_by_id(id).await {
                        Ok(Some(_)) => {
                            tracing::debug!(post_id = id, "Write confirmed");
                            return;
                        }
                        Ok(None) => {}
                        Err(e) => tracing::warn!(post_id = id, error = %e, "Confirm read failed"),
                    }

                    if Instant::now() >= deadline {
                        tracing::warn!(
                            post_id = id,
                            timeout_ms = timeout.as_millis() as u64,
                            "Write not visible before timeout, notifying anyway"
                        );
                        return;
                    }
                    sleep(interval).await;
                }
            }
        }
    }

    async fn notify(&self) -> NotifyOutcome {
        let Some(notifier) = &self.notifier else {
            return NotifyOutcome::Skipped;
        };

        match notifier.notify().await {
            Ok(()) => {
                tracing::info!("Rebuild webhook triggered");
                NotifyOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rebuild webhook failed, ignoring");
                NotifyOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{MISSING_FIELDS, NotifyError, RepoError};

    type Log = Arc<Mutex<Vec<String>>>;

    /// Vec-backed repository that records calls into a shared log.
    struct FakeRepo {
        posts: Mutex<Vec<Post>>,
        log: Log,
        fail_insert: bool,
        /// Number of `find_by_id` calls that report the row as missing.
        invisible_reads: Mutex<usize>,
    }

    impl FakeRepo {
        fn new(log: Log) -> Self {
            Self {
                posts: Mutex::new(Vec::new()),
                log,
                fail_insert: false,
                invisible_reads: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakeRepo {
        async fn init_schema(&self) -> Result<(), RepoError> {
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.posts.lock().unwrap().clone())
        }

        async fn insert(&self, post: &NewPost) -> Result<i64, RepoError> {
            self.log.lock().unwrap().push("insert".to_string());
            if self.fail_insert {
                return Err(RepoError::Connection("unreachable".to_string()));
            }
            let mut posts = self.posts.lock().unwrap();
            let id = posts.len() as i64 + 1;
            posts.push(post.clone().into_post(id));
            Ok(id)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
            self.log.lock().unwrap().push("find".to_string());
            let mut invisible = self.invisible_reads.lock().unwrap();
            if *invisible > 0 {
                *invisible -= 1;
                return Ok(None);
            }
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Ok(())
        }
    }

    struct FakeNotifier {
        log: Log,
        fail: bool,
    }

    #[async_trait]
    impl RebuildNotifier for FakeNotifier {
        async fn notify(&self) -> Result<(), NotifyError> {
            self.log.lock().unwrap().push("notify".to_string());
            if self.fail {
                Err(NotifyError::Status(502))
            } else {
                Ok(())
            }
        }
    }

    fn service(repo: FakeRepo, notifier: Option<FakeNotifier>, settle: SettlePolicy) -> PostService {
        PostService::new(
            Arc::new(repo),
            notifier.map(|n| Arc::new(n) as Arc<dyn RebuildNotifier>),
            settle,
        )
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_waits_two_seconds_before_notifying() {
        let log: Log = Arc::default();
        let svc = service(
            FakeRepo::new(log.clone()),
            Some(FakeNotifier { log: log.clone(), fail: false }),
            SettlePolicy::default(),
        );

        let started = Instant::now();
        let published = svc.publish(s("A"), s("B")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(published.post.id, 1);
        assert_eq!(published.post.title, "A");
        assert_eq!(published.notify, NotifyOutcome::Sent);
        assert_eq!(*log.lock().unwrap(), vec!["insert", "notify"]);
    }

    #[tokio::test]
    async fn test_invalid_input_touches_nothing() {
        let log: Log = Arc::default();
        let svc = service(
            FakeRepo::new(log.clone()),
            Some(FakeNotifier { log: log.clone(), fail: false }),
            SettlePolicy::FixedDelay(Duration::ZERO),
        );

        let err = svc.publish(s("  "), s("B")).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(ref m) if m == MISSING_FIELDS));
        assert!(log.lock().unwrap().is_empty());
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_failure_skips_delay_and_notification() {
        let log: Log = Arc::default();
        let mut repo = FakeRepo::new(log.clone());
        repo.fail_insert = true;
        let svc = service(
            repo,
            Some(FakeNotifier { log: log.clone(), fail: false }),
            SettlePolicy::default(),
        );

        let started = Instant::now();
        let err = svc.publish(s("A"), s("B")).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(RepoError::Connection(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(*log.lock().unwrap(), vec!["insert"]);
    }

    #[tokio::test]
    async fn test_notifier_failure_is_ignored() {
        let log: Log = Arc::default();
        let svc = service(
            FakeRepo::new(log.clone()),
            Some(FakeNotifier { log: log.clone(), fail: true }),
            SettlePolicy::FixedDelay(Duration::ZERO),
        );

        let published = svc.publish(s("A"), s("B")).await.unwrap();

        assert_eq!(published.notify, NotifyOutcome::Failed);
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_notifier_is_skipped() {
        let log: Log = Arc::default();
        let svc = service(
            FakeRepo::new(log.clone()),
            None,
            SettlePolicy::FixedDelay(Duration::ZERO),
        );

        let published = svc.publish(s("A"), s("B")).await.unwrap();
        assert_eq!(published.notify, NotifyOutcome::Skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_write_polls_until_visible() {
        let log: Log = Arc::default();
        let repo = FakeRepo::new(log.clone());
        *repo.invisible_reads.lock().unwrap() = 2;
        let svc = service(
            repo,
            Some(FakeNotifier { log: log.clone(), fail: false }),
            SettlePolicy::ConfirmWrite {
                timeout: Duration::from_secs(5),
                interval: Duration::from_millis(100),
            },
        );

        svc.publish(s("A"), s("B")).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["insert", "find", "find", "find", "notify"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_write_timeout_still_notifies() {
        let log: Log = Arc::default();
        let repo = FakeRepo::new(log.clone());
        *repo.invisible_reads.lock().unwrap() = usize::MAX;
        let svc = service(
            repo,
            Some(FakeNotifier { log: log.clone(), fail: false }),
            SettlePolicy::ConfirmWrite {
                timeout: Duration::from_secs(1),
                interval: Duration::from_millis(250),
            },
        );

        let started = Instant::now();
        let published = svc.publish(s("A"), s("B")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(published.notify, NotifyOutcome::Sent);
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("notify"));
    }
}
