use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::protocol;
use crate::envelope::{handle_message_send, parse_json_body};
use crate::errors::ProtocolError;
use crate::types::{A2aResponse, InboundEnvelope, JsonRpcResponse, RpcErrorBody};
use crate::AppState;

fn error_body(err: &ProtocolError) -> RpcErrorBody {
    RpcErrorBody {
        code: err.code(),
        message: err.to_string(),
    }
}

pub async fn a2a_send(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let result = parse_json_body(&body).and_then(|body| {
        let envelope = InboundEnvelope::from_json(&body);
        handle_message_send(&envelope, state.reply.as_ref())
    });

    match result {
        Ok(message) => {
            info!("Replied on /a2a in context {}", message.context_id);
            ResponseJson(A2aResponse {
                result: Some(message),
                error: None,
            })
            .into_response()
        }
        Err(err) => {
            debug!("Rejected /a2a request: {}", err);
            (
                StatusCode::BAD_REQUEST,
                ResponseJson(A2aResponse {
                    result: None,
                    error: Some(error_body(&err)),
                }),
            )
                .into_response()
        }
    }
}

pub async fn rpc_send(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let body = match parse_json_body(&body) {
        Ok(body) => body,
        Err(err) => return rpc_error(&err, Value::Null),
    };
    let id = body.get("id").cloned().unwrap_or(Value::Null);

    let result = validate_jsonrpc_version(&body).and_then(|_| {
        let envelope = InboundEnvelope::from_json(&body);
        handle_message_send(&envelope, state.reply.as_ref())
    });

    match result {
        Ok(message) => {
            info!("Replied on /rpc in context {}", message.context_id);
            ResponseJson(JsonRpcResponse {
                jsonrpc: protocol::JSONRPC_VERSION,
                result: Some(message),
                error: None,
                id,
            })
            .into_response()
        }
        Err(err) => rpc_error(&err, id),
    }
}

fn rpc_error(err: &ProtocolError, id: Value) -> Response {
    debug!("Rejected /rpc request: {}", err);
    (
        StatusCode::BAD_REQUEST,
        ResponseJson(JsonRpcResponse {
            jsonrpc: protocol::JSONRPC_VERSION,
            result: None,
            error: Some(error_body(err)),
            id,
        }),
    )
        .into_response()
}

fn validate_jsonrpc_version(body: &Value) -> Result<(), ProtocolError> {
    match body.get("jsonrpc") {
        Some(Value::String(version)) if version == protocol::JSONRPC_VERSION => Ok(()),
        Some(other) => Err(ProtocolError::InvalidEnvelope(format!(
            "jsonrpc must be \"2.0\", got {}",
            other
        ))),
        None => Err(ProtocolError::InvalidEnvelope(
            "missing jsonrpc field".to_string(),
        )),
    }
}
