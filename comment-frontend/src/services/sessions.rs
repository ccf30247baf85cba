//! One [`CommentBoard`] per browser session.

use super::board::CommentBoard;
use super::CommentSource;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct Entry {
    board: Arc<CommentBoard>,
    last_used: Instant,
}

/// Boards keyed by the id stored in each visitor's session.
///
/// Boards idle for longer than `idle_ttl` are dropped, unless a request is
/// still in flight on them.
pub struct SessionBoards {
    source: Arc<dyn CommentSource>,
    boards: Mutex<HashMap<String, Entry>>,
    idle_ttl: Duration,
}

impl SessionBoards {
    pub fn new(source: Arc<dyn CommentSource>, idle_ttl: Duration) -> Self {
        Self {
            source,
            boards: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// The board for `key`, created on first use.
    pub fn board(&self, key: &str) -> Arc<CommentBoard> {
        let now = Instant::now();
        let mut boards = self
            .boards
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        boards.retain(|id, entry| {
            id == key
                || entry.board.is_busy()
                || now.duration_since(entry.last_used) < self.idle_ttl
        });

        let entry = boards.entry(key.to_string()).or_insert_with(|| {
            tracing::debug!("Created comment board for new session");
            Entry {
                board: Arc::new(CommentBoard::new(self.source.clone())),
                last_used: now,
            }
        });
        entry.last_used = now;
        entry.board.clone()
    }

    /// The board for `key` if that session has submitted before.
    pub fn existing(&self, key: &str) -> Option<Arc<CommentBoard>> {
        let mut boards = self
            .boards
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        boards.get_mut(key).map(|entry| {
            entry.last_used = Instant::now();
            entry.board.clone()
        })
    }

    pub fn len(&self) -> usize {
        self.boards
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
