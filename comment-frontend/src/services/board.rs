//! The rendered comment list and its request/render cycle.

use super::CommentSource;
use crate::models::GeneratedComment;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// What a call to [`CommentBoard::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank post; nothing was sent.
    Skipped,
    /// Another submission is still in flight; nothing was sent.
    Busy,
    /// The list was replaced with this many comments.
    Rendered(usize),
    /// The request failed; the previous list is untouched.
    Failed,
}

/// Holds the busy flag for as long as it lives.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CommentBoard {
    source: Arc<dyn CommentSource>,
    comments: RwLock<Vec<GeneratedComment>>,
    busy: AtomicBool,
}

impl CommentBoard {
    pub fn new(source: Arc<dyn CommentSource>) -> Self {
        Self {
            source,
            comments: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of the comments currently on display.
    pub async fn comments(&self) -> Vec<GeneratedComment> {
        self.comments.read().await.clone()
    }

    /// Run one request/render cycle for `post`.
    ///
    /// The busy flag is cleared on every exit path, including when the
    /// returned future is dropped mid-request.
    pub async fn submit(&self, post: &str) -> SubmitOutcome {
        if post.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("Submission ignored while another is in flight");
            return SubmitOutcome::Busy;
        };

        match self.source.generate(post).await {
            Ok(comments) => {
                let count = comments.len();
                *self.comments.write().await = comments;
                SubmitOutcome::Rendered(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error generating comments");
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::RelayClientError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct FakeSource {
        reply: Result<Vec<GeneratedComment>, u16>,
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
        /// Fail every call after this many.
        fail_after: Option<usize>,
    }

    impl FakeSource {
        fn ok(comments: Vec<GeneratedComment>) -> Self {
            Self {
                reply: Ok(comments),
                calls: AtomicUsize::new(0),
                gate: None,
                fail_after: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CommentSource for FakeSource {
        async fn generate(
            &self,
            _post: &str,
        ) -> Result<Vec<GeneratedComment>, RelayClientError> {
            let previous = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let reply = match self.fail_after {
                Some(limit) if previous >= limit => Err(500),
                _ => self.reply.clone(),
            };
            reply.map_err(|status| RelayClientError::Rejected {
                status,
                message: "Failed to generate comments".to_string(),
            })
        }
    }

    fn five() -> Vec<GeneratedComment> {
        (1..=5)
            .map(|i| GeneratedComment::new("Magnetic Comment", format!("comment {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn blank_posts_issue_no_request() {
        let source = Arc::new(FakeSource::ok(five()));
        let board = CommentBoard::new(source.clone());

        assert_eq!(board.submit("").await, SubmitOutcome::Skipped);
        assert_eq!(board.submit("  \n\t ").await, SubmitOutcome::Skipped);
        assert_eq!(source.calls(), 0);
        assert!(!board.is_busy());
    }

    #[tokio::test]
    async fn success_replaces_comments_in_order() {
        let source = Arc::new(FakeSource::ok(five()));
        let board = CommentBoard::new(source.clone());

        assert_eq!(board.submit("post").await, SubmitOutcome::Rendered(5));
        assert_eq!(board.comments().await, five());
        assert_eq!(source.calls(), 1);
        assert!(!board.is_busy());
    }

    #[tokio::test]
    async fn failure_keeps_previous_comments() {
        let source = Arc::new(FakeSource {
            fail_after: Some(1),
            ..FakeSource::ok(five())
        });
        let board = CommentBoard::new(source.clone());

        assert_eq!(board.submit("first").await, SubmitOutcome::Rendered(5));
        assert_eq!(board.submit("second").await, SubmitOutcome::Failed);

        assert_eq!(board.comments().await, five());
        assert_eq!(source.calls(), 2);
        assert!(!board.is_busy());
    }

    #[tokio::test]
    async fn resubmission_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(FakeSource {
            reply: Ok(five()),
            calls: AtomicUsize::new(0),
            gate: Some(gate.clone()),
            fail_after: None,
        });
        let board = Arc::new(CommentBoard::new(source.clone()));

        let first = tokio::spawn({
            let board = board.clone();
            async move { board.submit("post").await }
        });

        while !board.is_busy() {
            tokio::task::yield_now().await;
        }
        assert_eq!(board.submit("post again").await, SubmitOutcome::Busy);

        gate.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Rendered(5));
        assert_eq!(source.calls(), 1);
        assert!(!board.is_busy());
    }

    #[tokio::test]
    async fn cancelled_submission_clears_busy() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(FakeSource {
            reply: Ok(five()),
            calls: AtomicUsize::new(0),
            gate: Some(gate),
            fail_after: None,
        });
        let board = CommentBoard::new(source);

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(20), board.submit("post")).await;

        assert!(timed_out.is_err());
        assert!(!board.is_busy());
        assert!(board.comments().await.is_empty());
    }
}
