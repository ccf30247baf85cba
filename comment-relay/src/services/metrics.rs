//! Prometheus metrics for comment-relay.
//!
//! HTTP request metrics come from `service_core::middleware::metrics_middleware`
//! through the installed recorder. Generation metrics live in a custom registry.

use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static RELAY_METRICS: OnceLock<RelayMetrics> = OnceLock::new();

pub struct RelayMetrics {
    registry: Registry,
    /// outcome: success, invalid_input, not_configured, failed
    pub comment_requests: IntCounterVec,
    pub generation_errors: IntCounterVec,
    pub provider_latency: HistogramVec,
    pub tokens: IntCounterVec,
    pub completions: IntCounterVec,
}

impl RelayMetrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let comment_requests = IntCounterVec::new(
            Opts::new(
                "relay_comment_requests_total",
                "Generate-comments requests by outcome",
            ),
            &["outcome"],
        )?;

        let generation_errors = IntCounterVec::new(
            Opts::new(
                "relay_generation_errors_total",
                "Failed generations by provider and error type",
            ),
            &["provider", "error_type"],
        )?;

        let provider_latency = HistogramVec::new(
            HistogramOpts::new(
                "relay_provider_latency_seconds",
                "Upstream provider latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "model"],
        )?;

        let tokens = IntCounterVec::new(
            Opts::new("relay_tokens_total", "Tokens reported by the provider"),
            &["model", "type"], // type: input, output
        )?;

        let completions = IntCounterVec::new(
            Opts::new(
                "relay_completions_total",
                "Successful provider calls by finish reason",
            ),
            &["model", "finish_reason"],
        )?;

        registry.register(Box::new(comment_requests.clone()))?;
        registry.register(Box::new(generation_errors.clone()))?;
        registry.register(Box::new(provider_latency.clone()))?;
        registry.register(Box::new(tokens.clone()))?;
        registry.register(Box::new(completions.clone()))?;

        Ok(Self {
            registry,
            comment_requests,
            generation_errors,
            provider_latency,
            tokens,
            completions,
        })
    }
}

/// Register the relay's generation metrics. Safe to call more than once.
pub fn register_relay_metrics() -> Result<(), prometheus::Error> {
    if RELAY_METRICS.get().is_none() {
        let _ = RELAY_METRICS.set(RelayMetrics::new()?);
    }
    Ok(())
}

/// Install the global recorder and register relay metrics. Call once at startup.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    let _ = METRICS_HANDLE.set(handle);

    register_relay_metrics().context("Failed to register relay metrics")?;

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

pub fn relay_metrics() -> Option<&'static RelayMetrics> {
    RELAY_METRICS.get()
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    let Some(metrics) = RELAY_METRICS.get() else {
        output.push_str("# Relay metrics not initialized\n");
        return output;
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return output;
    }

    match String::from_utf8(buffer) {
        Ok(custom) => output.push_str(&custom),
        Err(e) => tracing::error!(error = %e, "Failed to convert metrics to UTF-8"),
    }

    output
}

pub fn record_comment_request(outcome: &str) {
    if let Some(metrics) = RELAY_METRICS.get() {
        metrics.comment_requests.with_label_values(&[outcome]).inc();
    }
}

pub fn record_generation_error(provider: &str, error_type: &str) {
    if let Some(metrics) = RELAY_METRICS.get() {
        metrics
            .generation_errors
            .with_label_values(&[provider, error_type])
            .inc();
    }
}

pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(metrics) = RELAY_METRICS.get() {
        metrics
            .provider_latency
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record token usage and finish reason of a successful provider call.
pub fn record_completion(
    model: &str,
    input_tokens: Option<i32>,
    output_tokens: Option<i32>,
    finish_reason: Option<&str>,
) {
    let Some(metrics) = RELAY_METRICS.get() else {
        return;
    };

    for (kind, count) in [("input", input_tokens), ("output", output_tokens)] {
        if let Some(count) = count.and_then(|n| u64::try_from(n).ok()) {
            metrics.tokens.with_label_values(&[model, kind]).inc_by(count);
        }
    }

    metrics
        .completions
        .with_label_values(&[model, finish_reason.unwrap_or("unknown")])
        .inc();
}
