//! End-to-end relay tests against a stubbed Gemini API.

mod common;

use axum::http::StatusCode;
use comment_relay::config::GeminiSettings;
use comment_relay::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use comment_relay::services::providers::{GenerationParams, ProviderError, TextProvider};
use common::*;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-gemini-key";
const GENERATE_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn provider_for(server: &MockServer) -> GeminiTextProvider {
    let mut settings = GeminiSettings::new(Some(API_KEY));
    settings.api_base = server.uri();
    GeminiTextProvider::new(GeminiConfig::from_settings(&settings).unwrap()).unwrap()
}

#[tokio::test]
async fn sends_prompt_and_fixed_generation_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 2048
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_envelope("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .generate("the prompt", &GenerationParams::comment_defaults())
        .await
        .unwrap();

    assert_eq!(response.text, "hi there");
    assert_eq!(response.input_tokens, Some(512));
    assert_eq!(response.output_tokens, Some(256));
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "the prompt");
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate("p", &GenerationParams::comment_defaults())
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::UpstreamStatus(503));
}

#[tokio::test]
async fn missing_candidate_content_is_invalid_response() {
    let bodies = [
        json!({}),
        json!({ "candidates": [] }),
        json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
        json!({ "candidates": [{ "content": { "parts": [] } }] }),
    ];

    for body in bodies {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .generate("p", &GenerationParams::comment_defaults())
            .await
            .unwrap_err();
        assert_eq!(err, ProviderError::InvalidResponse, "body: {}", body);
    }
}

#[tokio::test]
async fn non_json_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .generate("p", &GenerationParams::comment_defaults())
        .await
        .unwrap_err();
    assert_eq!(err, ProviderError::InvalidResponse);
}

#[tokio::test]
async fn relay_calls_gemini_exactly_once_and_returns_comments() {
    let server = MockServer::start().await;
    let upstream = comments_json(5);
    let text = format!("Here you go!\n{}\nCheers", upstream);
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_envelope(&text)))
        .expect(1)
        .mount(&server)
        .await;

    let router = router_with(Arc::new(provider_for(&server)));
    let response = post_json(router, json!({ "post": SHIPPED_POST })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), upstream);
    assert_cors(&response.headers);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains(SHIPPED_POST));
}

#[tokio::test]
async fn relay_surfaces_gemini_status_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let router = router_with(Arc::new(provider_for(&server)));
    let response = post_json(router, json!({ "post": SHIPPED_POST })).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({
            "error": "Failed to generate comments",
            "details": "Gemini API error: 500"
        })
    );
}

#[tokio::test]
async fn relay_reports_malformed_gemini_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let router = router_with(Arc::new(provider_for(&server)));
    let response = post_json(router, json!({ "post": SHIPPED_POST })).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["details"], "Invalid response from Gemini API");
}

#[tokio::test]
async fn health_check_lists_models_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(provider_for(&server).health_check().await.is_ok());
}
