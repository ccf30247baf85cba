//! Text generation provider abstraction.
//!
//! The relay talks to exactly one upstream through [`TextProvider`]; tests
//! swap in [`mock::MockTextProvider`].

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Gemini API error: {0}")]
    UpstreamStatus(u16),

    #[error("Invalid response from Gemini API")]
    InvalidResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Text returned by a provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text of the first candidate.
    pub text: String,

    pub input_tokens: Option<i32>,

    pub output_tokens: Option<i32>,

    /// Raw finish reason reported upstream, e.g. `STOP` or `MAX_TOKENS`.
    pub finish_reason: Option<String>,
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// The fixed parameters used for comment generation.
    pub const fn comment_defaults() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
///
/// `generate` makes exactly one upstream call; implementations must not retry.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short provider name used as a metrics label.
    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
