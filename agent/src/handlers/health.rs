use axum::response::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn ready() -> Json<Value> {
    Json(json!({ "status": "ready" }))
}
