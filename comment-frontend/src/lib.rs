pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::sessions::SessionBoards;
use services::CommentSource;
use std::sync::Arc;
use std::time::Duration;

/// Sessions and their boards expire after this long without a request.
pub const SESSION_IDLE_HOURS: i64 = 24;

/// Shared application state: every visitor's board.
#[derive(Clone)]
pub struct AppState {
    pub boards: Arc<SessionBoards>,
}

impl AppState {
    pub fn new(source: Arc<dyn CommentSource>) -> Self {
        Self {
            boards: Arc::new(SessionBoards::new(
                source,
                Duration::from_secs(SESSION_IDLE_HOURS.unsigned_abs() * 60 * 60),
            )),
        }
    }
}
