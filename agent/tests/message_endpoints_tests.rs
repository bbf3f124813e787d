//! Integration tests for the `/a2a` and `/rpc` message endpoints

mod common;

use axum::http::StatusCode;
use common::{message_send, post_json, post_raw, test_router};
use rstest::rstest;
use serde_json::{json, Value};

#[tokio::test]
async fn test_a2a_replies_with_outbound_message() {
    let (status, body) = post_json(test_router(), "/a2a", message_send(json!([{"text": "World"}]))).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["kind"], "message");
    assert_eq!(result["role"], "agent");
    assert_eq!(result["parts"], json!([{"text": "You said: World"}]));
    assert!(result["messageId"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(result["contextId"].as_str().is_some_and(|id| id.starts_with("ctx-")));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_a2a_preserves_context_id() {
    let mut envelope = message_send(json!([{"text": "hi"}]));
    envelope["params"]["contextId"] = json!("ctx-123");

    let (status, body) = post_json(test_router(), "/a2a", envelope).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["contextId"], "ctx-123");
}

#[tokio::test]
async fn test_a2a_uses_message_context_id() {
    let envelope = json!({
        "method": "message/send",
        "params": { "message": { "contextId": "conv-7", "parts": [{"text": "hi"}] } }
    });

    let (_, body) = post_json(test_router(), "/a2a", envelope).await;
    assert_eq!(body["result"]["contextId"], "conv-7");
}

#[tokio::test]
async fn test_a2a_synthesizes_distinct_context_ids() {
    let (_, first) = post_json(test_router(), "/a2a", message_send(json!([{"text": "a"}]))).await;
    let (_, second) = post_json(test_router(), "/a2a", message_send(json!([{"text": "a"}]))).await;

    assert_ne!(first["result"]["contextId"], second["result"]["contextId"]);
    assert_ne!(first["result"]["messageId"], second["result"]["messageId"]);
}

#[tokio::test]
async fn test_a2a_rejects_unsupported_method() {
    let envelope = json!({"method": "tasks/get", "params": {}});

    let (status, body) = post_json(test_router(), "/a2a", envelope).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32601);
    assert!(body["error"]["message"].as_str().unwrap().contains("tasks/get"));
    assert!(body.get("result").is_none());
}

#[rstest]
#[case::no_parts(json!([]))]
#[case::empty_text(json!([{"text": ""}]))]
#[case::missing_text(json!([{"kind": "file"}]))]
#[case::whitespace_then_text(json!([{"text": "  "}, {"text": "hi"}]))]
#[tokio::test]
async fn test_a2a_rejects_envelopes_without_text(#[case] parts: Value) {
    let (status, body) = post_json(test_router(), "/a2a", message_send(parts)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_a2a_missing_params_is_no_text() {
    let (status, body) = post_json(test_router(), "/a2a", json!({"method": "message/send"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32602);
}

fn rpc(body: Value, id: Value) -> Value {
    let mut body = body;
    body["jsonrpc"] = json!("2.0");
    body["id"] = id;
    body
}

#[tokio::test]
async fn test_rpc_success_echoes_id() {
    let body = rpc(message_send(json!([{"text": "World"}])), json!(42));

    let (status, response) = post_json(test_router(), "/rpc", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 42);
    assert_eq!(response["result"]["parts"][0]["text"], "You said: World");
}

#[rstest]
#[case::unsupported_method(json!({"jsonrpc": "2.0", "method": "tasks/get", "params": {}, "id": 42}), -32601)]
#[case::no_text(json!({"jsonrpc": "2.0", "method": "message/send", "params": {}, "id": 42}), -32602)]
#[case::old_version(json!({"jsonrpc": "1.0", "method": "message/send", "params": {}, "id": 42}), -32600)]
#[case::missing_version(json!({"method": "message/send", "params": {}, "id": 42}), -32600)]
#[tokio::test]
async fn test_rpc_errors_echo_id(#[case] body: Value, #[case] code: i64) {
    let (status, response) = post_json(test_router(), "/rpc", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 42);
    assert_eq!(response["error"]["code"], code);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_rpc_version_checked_before_method() {
    let body = json!({"jsonrpc": "1.0", "method": "tasks/get", "id": "abc"});

    let (_, response) = post_json(test_router(), "/rpc", body).await;

    assert_eq!(response["error"]["code"], -32600);
    assert_eq!(response["id"], "abc");
}

#[tokio::test]
async fn test_rpc_without_id_answers_null_id() {
    let mut body = message_send(json!([{"text": "hi"}]));
    body["jsonrpc"] = json!("2.0");

    let (status, response) = post_json(test_router(), "/rpc", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["id"], Value::Null);
}

#[rstest]
#[case(None)]
#[case(Some("text/plain"))]
#[tokio::test]
async fn test_a2a_accepts_body_without_json_content_type(#[case] content_type: Option<&'static str>) {
    let envelope = message_send(json!([{"text": "hi"}])).to_string();

    let (status, body) = post_raw(test_router(), "/a2a", &envelope, content_type).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["parts"][0]["text"], "You said: hi");
}

#[tokio::test]
async fn test_a2a_malformed_json_is_parse_error() {
    let (status, body) = post_raw(test_router(), "/a2a", "{oops", Some("application/json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["error"]["message"].as_str().unwrap().starts_with("Parse error"));
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_rpc_malformed_json_answers_null_id() {
    let (status, body) = post_raw(test_router(), "/rpc", "{oops", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], Value::Null);
    assert!(body.as_object().unwrap().contains_key("id"));
    assert_eq!(body["error"]["code"], -32700);
}
