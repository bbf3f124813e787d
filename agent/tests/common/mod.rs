//! Shared helpers for driving the router in-process

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use hello_a2a::{create_router, AgentConfig, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Config with a fixed public URL so discovery links are predictable
pub fn test_config() -> AgentConfig {
    AgentConfig {
        public_url: Some("https://agent.example.com".to_string()),
        reply_prefix: "You said: ".to_string(),
        ..AgentConfig::default()
    }
}

pub fn test_router() -> Router {
    router_with(test_config())
}

pub fn router_with(config: AgentConfig) -> Router {
    create_router(AppState::with_echo(config).expect("Failed to build app state"))
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    send(app, request).await
}

/// POST of a raw body, optionally without any `Content-Type` header
pub async fn post_raw(
    app: Router,
    uri: &str,
    body: &str,
    content_type: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }
    let request = request
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    send(app, request).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

/// `message/send` envelope with the given parts
pub fn message_send(parts: Value) -> Value {
    serde_json::json!({
        "method": "message/send",
        "params": { "message": { "role": "user", "parts": parts } }
    })
}
