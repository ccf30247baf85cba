pub mod board;
pub mod relay_client;
pub mod sessions;

use crate::models::GeneratedComment;
use async_trait::async_trait;
pub use relay_client::{RelayClient, RelayClientError};

/// Anything that can turn a post into comments; the relay in production.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn generate(&self, post: &str) -> Result<Vec<GeneratedComment>, RelayClientError>;
}
