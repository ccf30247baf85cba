//! Mock provider for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use crate::models::{CommentKind, CommentsResponse, GeneratedComment};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockReply {
    Text(String),
    Error(ProviderError),
}

/// Returns a canned reply and records every prompt it receives.
pub struct MockTextProvider {
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Reply with `text` as the generated candidate text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            reply: MockReply::Text(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            reply: MockReply::Error(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply with five well-formed comments wrapped in a line of prose, the
    /// way models tend to answer.
    pub fn with_sample_comments() -> Self {
        let json = serde_json::to_string_pretty(&sample_comments()).unwrap_or_default();
        Self::with_text(format!("Here are your comments:\n\n{}\n\nEnjoy! ☕", json))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts().len()
    }
}

/// Five comments, one per framework, in response order.
pub fn sample_comments() -> CommentsResponse {
    CommentsResponse {
        comments: CommentKind::ALL
            .iter()
            .map(|kind| GeneratedComment::new(*kind, format!("Sample {} 🔥", kind.label())))
            .collect(),
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        match &self.reply {
            MockReply::Text(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: i32::try_from(prompt.len() / 4).ok(),
                output_tokens: i32::try_from(text.len() / 4).ok(),
                finish_reason: Some("STOP".to_string()),
            }),
            MockReply::Error(err) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.reply {
            MockReply::Text(_) => Ok(()),
            MockReply::Error(err) => Err(err.clone()),
        }
    }
}
