use crate::services::metrics::get_metrics;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// Liveness check. Reports whether an upstream key is configured without
/// calling upstream.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "comment-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "upstream_configured": state.generator.is_some(),
    }))
}

/// Readiness check. Verifies the upstream key against the provider.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(generator) = state.generator.as_ref() else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };

    match generator.upstream_health().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Upstream health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}
