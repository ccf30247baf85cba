#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use comment_relay::services::providers::TextProvider;
use comment_relay::startup::{build_router, AppState, GENERATE_COMMENTS_PATH};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const SHIPPED_POST: &str = "I just shipped a new feature!";

pub const FIVE_LABELS: [&str; 5] = [
    "Magnetic Comment",
    "Credibility Comment",
    "Resonance Comment",
    "Funny/Smart Punchline",
    "Subtle CTA Comment",
];

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState::with_provider(provider))
}

pub async fn send(router: Router, method: Method, body: impl Into<Body>) -> TestResponse {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(GENERATE_COMMENTS_PATH)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(router: Router, payload: Value) -> TestResponse {
    send(router, Method::POST, payload.to_string()).await
}

/// A `comments` object with `n` entries cycling through the five labels.
pub fn comments_json(n: usize) -> Value {
    let comments: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "type": FIVE_LABELS[i % FIVE_LABELS.len()],
                "content": format!("Comment number {} ☕", i + 1),
            })
        })
        .collect();
    json!({ "comments": comments })
}

/// Wrap generated text in a Gemini `generateContent` response envelope.
pub fn gemini_envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 512,
            "candidatesTokenCount": 256,
            "totalTokenCount": 768
        }
    })
}

pub fn assert_cors(headers: &HeaderMap) {
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "Content-Type, Authorization"
    );
}
