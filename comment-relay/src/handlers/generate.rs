use crate::services::metrics::record_comment_request;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use service_core::error::AppError;
use tracing::instrument;

/// Pull a usable `post` out of the raw request body.
///
/// The body must be a JSON object whose `post` is a string with
/// non-whitespace content. The string is returned untrimmed.
fn parse_post(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let post = value.get("post")?.as_str()?;
    if post.trim().is_empty() {
        return None;
    }
    Some(post.to_string())
}

/// `POST /functions/v1/generate-comments`
#[instrument(skip_all)]
pub async fn generate_comments(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let post = parse_post(&body).ok_or_else(|| {
        tracing::info!(body_len = body.len(), "Rejected request without usable post");
        record_comment_request("invalid_input");
        AppError::BadRequest(anyhow::anyhow!("Invalid post content"))
    })?;

    let generator = state.generator.as_ref().ok_or_else(|| {
        tracing::error!("GEMINI_API_KEY is not set; cannot generate comments");
        record_comment_request("not_configured");
        AppError::ConfigError(anyhow::anyhow!("API key not configured"))
    })?;

    match generator.generate(&post).await {
        Ok(comments) => {
            tracing::info!(post_len = post.len(), "Generated comments");
            record_comment_request("success");
            Ok(Json(comments))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating comments");
            record_comment_request("failed");
            Err(AppError::OperationFailed(
                "Failed to generate comments".to_string(),
                e.into(),
            ))
        }
    }
}

/// `OPTIONS` preflight: empty 200; CORS headers come from the middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
