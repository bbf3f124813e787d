//! Discovery documents: agent card, manifest and agent directories.
//!
//! All links are built from the resolved public base URL so the documents
//! stay correct behind a reverse proxy.

use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::AgentConfig;
use crate::middleware::PublicBaseUrl;
use crate::AppState;

fn say_hello_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "name": { "type": "string", "description": "Name to greet" } },
        "required": ["name"],
        "additionalProperties": false
    })
}

fn say_hello_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "message": { "type": "string" } },
        "required": ["message"],
        "additionalProperties": false
    })
}

fn endpoints(config: &AgentConfig, base: &str) -> Value {
    json!({
        "invoke": format!("{}/api/v1/agents/{}/invoke", base, config.agent_id),
        "health": format!("{}/healthz", base),
    })
}

/// Directory entry shared by `/a2a/agents` and the well-known listings.
fn directory_entry(config: &AgentConfig, base: &str) -> Value {
    json!({
        "id": config.agent_id,
        "name": config.agent_name,
        "version": config.agent_version,
        "description": config.agent_description,
        "tags": config.tags,
        "endpoints": endpoints(config, base),
        "auth": { "type": "none" },
        "input_schema": say_hello_input_schema(),
        "output_schema": say_hello_output_schema(),
    })
}

pub async fn agent_card(
    State(state): State<Arc<AppState>>,
    PublicBaseUrl(base): PublicBaseUrl,
) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "protocolVersion": "0.3.0",
        "name": config.agent_name,
        "description": config.agent_description,
        "url": format!("{}/a2a", base),
        "version": config.agent_version,
        "capabilities": {
            "streaming": false,
            "pushNotifications": false,
            "stateTransitionHistory": false
        },
        "defaultInputModes": ["text/plain"],
        "defaultOutputModes": ["text/plain"],
        "skills": [{
            "id": "say_hello",
            "name": "Say Hello",
            "description": "Return a friendly greeting.",
            "tags": config.tags,
        }]
    }))
}

pub async fn manifest(
    State(state): State<Arc<AppState>>,
    PublicBaseUrl(base): PublicBaseUrl,
) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "apiVersion": "a2a/v1",
        "kind": "Agent",
        "metadata": {
            "id": config.agent_id,
            "name": config.agent_name,
            "version": config.agent_version,
            "description": config.agent_description,
        },
        "spec": {
            "endpoints": endpoints(config, &base),
            "auth": { "type": "none" },
            "inputSchema": say_hello_input_schema(),
            "outputSchema": say_hello_output_schema(),
            "endpointBaseUrl": base,
            "openapi": "/openapi.json",
            "actions": [{
                "name": "say_hello",
                "description": "Return a friendly greeting using the Universal A2A backend.",
                "method": "POST",
                "path": "/a2a/actions/say_hello",
                "input": say_hello_input_schema(),
                "output": say_hello_output_schema(),
            }]
        }
    }))
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn get_operation(summary: &str) -> Value {
    json!({ "get": {
        "summary": summary,
        "responses": { "200": { "description": "OK", "content": json_content(json!({ "type": "object" })) } }
    } })
}

fn post_operation(summary: &str, input: Value, output: Value) -> Value {
    json!({ "post": {
        "summary": summary,
        "requestBody": { "required": true, "content": json_content(input) },
        "responses": { "200": { "description": "OK", "content": json_content(output) } }
    } })
}

/// Minimal OpenAPI 3 document for the HTTP surface, linked from the manifest.
pub async fn openapi(
    State(state): State<Arc<AppState>>,
    PublicBaseUrl(base): PublicBaseUrl,
) -> Json<Value> {
    let config = &state.config;
    let object = || json!({ "type": "object" });

    let mut invoke = post_operation(
        "Invoke the greeting action",
        say_hello_input_schema(),
        say_hello_output_schema(),
    );
    invoke["post"]["parameters"] = json!([{
        "name": "agent_id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);

    Json(json!({
        "openapi": "3.0.3",
        "info": {
            "title": config.agent_name,
            "version": config.agent_version,
            "description": config.agent_description,
        },
        "servers": [{ "url": base }],
        "paths": {
            "/a2a": post_operation("A2A message/send", object(), object()),
            "/rpc": post_operation("JSON-RPC 2.0 message/send", object(), object()),
            "/openai/v1/chat/completions": post_operation("Chat completion", object(), object()),
            "/a2a/actions/say_hello": post_operation(
                "Return a friendly greeting",
                say_hello_input_schema(),
                say_hello_output_schema(),
            ),
            "/api/v1/agents/{agent_id}/invoke": invoke,
            "/.well-known/agent-card.json": get_operation("A2A agent card"),
            "/a2a/manifest": get_operation("Agent manifest"),
            "/a2a/agents": get_operation("Agent directory"),
            "/.well-known/ica4aa/agents": get_operation("Well-known agent listing"),
            "/api/v1/agents": get_operation("Agent listing"),
            "/health": get_operation("Liveness"),
            "/healthz": get_operation("Liveness"),
            "/readyz": get_operation("Readiness"),
        }
    }))
}

pub async fn agents_directory(
    State(state): State<Arc<AppState>>,
    PublicBaseUrl(base): PublicBaseUrl,
) -> Json<Value> {
    let mut entry = directory_entry(&state.config, &base);
    if let Some(obj) = entry.as_object_mut() {
        obj.insert("manifestUrl".to_string(), json!(format!("{}/a2a/manifest", base)));
        obj.insert("endpointBaseUrl".to_string(), json!(base));
    }
    Json(json!({ "agents": [entry] }))
}

pub async fn well_known_agents(
    State(state): State<Arc<AppState>>,
    PublicBaseUrl(base): PublicBaseUrl,
) -> Json<Value> {
    Json(json!({
        "version": "1.0",
        "agents": [directory_entry(&state.config, &base)]
    }))
}
