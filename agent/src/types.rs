use serde::{Deserialize, Serialize};
use serde_json::Value;

// === A2A ENVELOPES ===

/// Inbound `message/send` envelope.
///
/// Built leniently from any JSON body: a missing or non-string `method`
/// reads as `""` and a missing `params` as `null`, so malformed bodies fail
/// the method check instead of the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InboundEnvelope {
    pub method: String,
    pub params: Value,
}

impl InboundEnvelope {
    pub fn from_json(body: &Value) -> Self {
        Self {
            method: body
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            params: body.get("params").cloned().unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// Canonical reply envelope. Always carries exactly one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub kind: String,
    pub message_id: String,
    pub context_id: String,
    pub role: String,
    pub parts: Vec<TextPart>,
}

// === ERROR BODIES ===

#[derive(Debug, Serialize)]
pub struct RpcErrorBody {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct A2aResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OutboundMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OutboundMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
    pub id: Value,
}

// === CHAT COMPLETIONS ===

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: Value,
}

/// Chat-completion request, read leniently: entries that are not objects
/// or carry a non-string `role` keep an empty role so scans skip them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    pub fn from_json(body: &Value) -> Self {
        let messages = body
            .get("messages")
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .map(|message| ChatMessage {
                        role: message
                            .get("role")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        content: message.get("content").cloned().unwrap_or(Value::Null),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            model: body
                .get("model")
                .and_then(Value::as_str)
                .map(str::to_string),
            messages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReplyMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatReplyMessage,
    pub finish_reason: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: ChatUsage,
}

// === GREETING ACTION ===

#[derive(Debug, Default, Deserialize)]
pub struct SayHelloRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SayHelloResponse {
    pub message: String,
}
