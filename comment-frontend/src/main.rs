use comment_frontend::config::FrontendConfig;
use comment_frontend::services::RelayClient;
use comment_frontend::startup::build_router;
use comment_frontend::AppState;
use service_core::observability::init_tracing;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = FrontendConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "comment-frontend",
        &configuration.common.log_level,
        configuration.common.otlp_endpoint.as_deref(),
    );

    let relay_client = RelayClient::new(&configuration.relay)?;
    let app = build_router(AppState::new(Arc::new(relay_client)));

    let address = format!("0.0.0.0:{}", configuration.common.port);
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting comment-frontend on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
