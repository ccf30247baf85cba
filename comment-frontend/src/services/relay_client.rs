//! HTTP client for the comment relay function.

use super::CommentSource;
use crate::config::RelaySettings;
use crate::models::{CommentsResponse, GeneratedComment};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use service_core::observability::inject_trace_headers;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

/// Path of the relay function relative to the functions host.
pub const GENERATE_COMMENTS_PATH: &str = "/functions/v1/generate-comments";

#[derive(Debug, Error)]
pub enum RelayClientError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Request to relay failed: {0}")]
    Network(String),

    /// Non-success status; `message` is the relay's `error` field when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed relay response: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct RelayErrorBody {
    error: Option<String>,
}

pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
    anon_key: Secret<String>,
}

impl RelayClient {
    pub fn new(settings: &RelaySettings) -> Result<Self, RelayClientError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RelayClientError::Client(e.to_string()))?;

        let endpoint = format!(
            "{}{}",
            settings.base_url.trim_end_matches('/'),
            GENERATE_COMMENTS_PATH
        );

        tracing::info!(endpoint = %endpoint, "Relay client configured");

        Ok(Self {
            client,
            endpoint,
            anon_key: settings.anon_key.clone(),
        })
    }

    /// Send one generate request. Never retries.
    #[instrument(skip_all, fields(post_len = post.len()))]
    pub async fn generate_comments(
        &self,
        post: &str,
    ) -> Result<Vec<GeneratedComment>, RelayClientError> {
        let request_id = Uuid::new_v4().to_string();
        let mut headers = HeaderMap::new();
        inject_trace_headers(&mut headers, Some(&request_id));

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .bearer_auth(self.anon_key.expose_secret())
            .json(&json!({ "post": post }))
            .send()
            .await
            .map_err(|e| RelayClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<RelayErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                error = %message,
                "Relay rejected request"
            );
            return Err(RelayClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: CommentsResponse = response
            .json()
            .await
            .map_err(|e| RelayClientError::Decode(e.to_string()))?;

        tracing::debug!(
            request_id = %request_id,
            count = body.comments.len(),
            "Relay returned comments"
        );

        Ok(body.comments)
    }
}

#[async_trait]
impl CommentSource for RelayClient {
    async fn generate(&self, post: &str) -> Result<Vec<GeneratedComment>, RelayClientError> {
        self.generate_comments(post).await
    }
}
