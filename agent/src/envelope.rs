//! Message envelope processing shared by `/a2a`, `/rpc` and the local
//! envelope client.

use axum::body::Bytes;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::constants::protocol;
use crate::errors::ProtocolError;
use crate::services::reply::ReplyGenerator;
use crate::types::{InboundEnvelope, OutboundMessage, TextPart};

/// Parses a raw request body as JSON regardless of its `Content-Type`.
pub fn parse_json_body(body: &Bytes) -> Result<Value, ProtocolError> {
    serde_json::from_slice(body).map_err(|e| ProtocolError::ParseError(e.to_string()))
}

/// Text of the first part in `params.message.parts` holding a non-empty
/// string. No trimming happens here; a part of only whitespace still wins.
pub fn extract_user_text(params: &Value) -> String {
    params
        .get("message")
        .and_then(|message| message.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| {
            parts.iter().find_map(|part| {
                part.as_object()
                    .and_then(|part| part.get("text"))
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
            })
        })
        .unwrap_or_default()
        .to_string()
}

/// `params.contextId`, then `params.message.contextId`, then a fresh id.
pub fn extract_context_id(params: &Value) -> String {
    let non_empty = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    };

    non_empty(params.get("contextId"))
        .or_else(|| non_empty(params.get("message").and_then(|m| m.get("contextId"))))
        .unwrap_or_else(new_context_id)
}

pub fn new_context_id() -> String {
    format!("{}{}", protocol::CONTEXT_ID_PREFIX, Uuid::new_v4().simple())
}

pub fn build_reply_envelope(reply_text: &str, context_id: &str) -> OutboundMessage {
    OutboundMessage {
        kind: "message".to_string(),
        message_id: Uuid::new_v4().to_string(),
        context_id: context_id.to_string(),
        role: "agent".to_string(),
        parts: vec![TextPart {
            text: reply_text.to_string(),
        }],
    }
}

pub fn handle_message_send(
    envelope: &InboundEnvelope,
    reply: &dyn ReplyGenerator,
) -> Result<OutboundMessage, ProtocolError> {
    if envelope.method != protocol::MESSAGE_SEND {
        return Err(ProtocolError::UnsupportedMethod(envelope.method.clone()));
    }

    let text = extract_user_text(&envelope.params);
    let text = text.trim();
    if text.is_empty() {
        return Err(ProtocolError::NoTextFound);
    }

    let context_id = extract_context_id(&envelope.params);
    debug!("message/send in context {}: {} chars", context_id, text.len());

    let reply_text = reply.reply(text);
    Ok(build_reply_envelope(&reply_text, &context_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reply::EchoReply;
    use serde_json::json;
    use std::collections::HashSet;

    fn send(params: Value) -> InboundEnvelope {
        InboundEnvelope {
            method: "message/send".to_string(),
            params,
        }
    }

    #[test]
    fn parse_body_reports_invalid_json() {
        let err = parse_json_body(&Bytes::from_static(b"{oops")).unwrap_err();
        assert_eq!(err.code(), -32700);

        let value = parse_json_body(&Bytes::from_static(b"{\"method\":\"x\"}")).unwrap();
        assert_eq!(value["method"], "x");
    }

    #[test]
    fn extract_text_skips_parts_without_text() {
        let params = json!({"message": {"parts": [{"kind": "data"}, 7, {"text": ""}, {"text": "hi"}]}});
        assert_eq!(extract_user_text(&params), "hi");
    }

    #[test]
    fn extract_text_degrades_on_malformed_params() {
        assert_eq!(extract_user_text(&Value::Null), "");
        assert_eq!(extract_user_text(&json!({"message": {"parts": "nope"}})), "");
        assert_eq!(extract_user_text(&json!({"message": 3})), "");
        assert_eq!(extract_user_text(&json!({"message": {"parts": [{"text": 5}]}})), "");
    }

    #[test]
    fn whitespace_first_part_wins_then_trims_to_nothing() {
        let params = json!({"message": {"parts": [{"text": "  "}, {"text": "hi"}]}});
        assert_eq!(extract_user_text(&params), "  ");

        let err = handle_message_send(&send(params), &EchoReply::new("")).unwrap_err();
        assert_eq!(err, ProtocolError::NoTextFound);
    }

    #[test]
    fn context_id_prefers_params_then_message() {
        let params = json!({"contextId": "ctx-123", "message": {"contextId": "inner"}});
        assert_eq!(extract_context_id(&params), "ctx-123");

        let params = json!({"contextId": "", "message": {"contextId": "inner"}});
        assert_eq!(extract_context_id(&params), "inner");
    }

    #[test]
    fn synthesized_context_ids_differ() {
        let a = extract_context_id(&json!({}));
        let b = extract_context_id(&json!({}));
        assert!(a.starts_with("ctx-"));
        assert_ne!(a, b);
    }

    #[test]
    fn message_ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000)
            .map(|_| build_reply_envelope("x", "ctx").message_id)
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn reply_envelope_has_single_agent_part() {
        let message = build_reply_envelope("", "ctx-1");
        assert_eq!(message.kind, "message");
        assert_eq!(message.role, "agent");
        assert_eq!(message.parts, vec![TextPart { text: String::new() }]);
    }

    #[test]
    fn handle_rejects_other_methods() {
        let envelope = InboundEnvelope {
            method: "tasks/get".to_string(),
            params: json!({"message": {"parts": [{"text": "hi"}]}}),
        };
        let err = handle_message_send(&envelope, &EchoReply::new("")).unwrap_err();
        assert_eq!(err, ProtocolError::UnsupportedMethod("tasks/get".to_string()));
        assert!(err.to_string().contains("tasks/get"));
    }

    #[test]
    fn handle_echoes_trimmed_text_with_prefix() {
        let envelope = send(json!({"contextId": "ctx-123", "message": {"parts": [{"text": " World "}]}}));

        let message = handle_message_send(&envelope, &EchoReply::new("")).unwrap();
        assert_eq!(message.parts[0].text, "World");
        assert_eq!(message.context_id, "ctx-123");

        let message = handle_message_send(&envelope, &EchoReply::new("You said: ")).unwrap();
        assert_eq!(message.parts[0].text, "You said: World");
    }
}
