use super::extract::extract_json_object;
use super::metrics;
use super::prompt::build_prompt;
use super::providers::{GenerationParams, ProviderError, TextProvider};
use crate::models::{CommentKind, COMMENT_COUNT};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Could not extract JSON from AI response")]
    NoJson,

    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response structure from AI")]
    InvalidStructure,
}

impl GenerationError {
    /// Stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Provider(ProviderError::NotConfigured(_)) => "not_configured",
            GenerationError::Provider(ProviderError::UpstreamStatus(_)) => "upstream_status",
            GenerationError::Provider(ProviderError::InvalidResponse) => "invalid_response",
            GenerationError::Provider(ProviderError::NetworkError(_)) => "network",
            GenerationError::NoJson => "no_json",
            GenerationError::Parse(_) => "parse",
            GenerationError::InvalidStructure => "invalid_structure",
        }
    }
}

/// Check that `value` carries a `comments` array of exactly five entries.
pub fn validate_comments(value: &Value) -> Result<(), GenerationError> {
    match value.get("comments").and_then(Value::as_array) {
        Some(comments) if comments.len() == COMMENT_COUNT => Ok(()),
        _ => Err(GenerationError::InvalidStructure),
    }
}

/// Entries whose `type` is not one of the five framework labels. Labels are
/// reported, never enforced.
fn unknown_label_count(value: &Value) -> usize {
    value
        .get("comments")
        .and_then(Value::as_array)
        .map(|comments| {
            comments
                .iter()
                .filter(|item| {
                    item.get("type")
                        .and_then(Value::as_str)
                        .and_then(CommentKind::from_label)
                        .is_none()
                })
                .count()
        })
        .unwrap_or(0)
}

/// Turns a post into the validated upstream answer.
#[derive(Clone)]
pub struct CommentGenerator {
    provider: Arc<dyn TextProvider>,
}

impl CommentGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Generate comments for `post` with a single upstream call.
    ///
    /// The parsed object is returned as-is, extra fields included.
    #[instrument(skip_all, fields(post_len = post.len()))]
    pub async fn generate(&self, post: &str) -> Result<Value, GenerationError> {
        let result = self.generate_inner(post).await;
        if let Err(e) = &result {
            metrics::record_generation_error(self.provider.provider_name(), e.kind());
        }
        result
    }

    async fn generate_inner(&self, post: &str) -> Result<Value, GenerationError> {
        let prompt = build_prompt(post);
        let provider = self.provider.provider_name();
        let model = self.provider.model();

        let start = Instant::now();
        let response = self
            .provider
            .generate(&prompt, &GenerationParams::comment_defaults())
            .await;
        metrics::record_provider_latency(provider, model, start.elapsed().as_secs_f64());
        let response = response?;

        metrics::record_completion(
            model,
            response.input_tokens,
            response.output_tokens,
            response.finish_reason.as_deref(),
        );

        let json = extract_json_object(&response.text).ok_or_else(|| {
            tracing::warn!(
                text_len = response.text.len(),
                "No JSON object in generated text"
            );
            GenerationError::NoJson
        })?;

        let parsed: Value = serde_json::from_str(json)?;
        validate_comments(&parsed)?;

        let unknown = unknown_label_count(&parsed);
        if unknown > 0 {
            tracing::warn!(
                unknown_labels = unknown,
                "Generated comments carry unrecognized labels"
            );
        }

        Ok(parsed)
    }

    pub async fn upstream_health(&self) -> Result<(), ProviderError> {
        self.provider.health_check().await
    }
}
