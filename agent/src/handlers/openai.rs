//! OpenAI-style chat completion over the same reply backend.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::envelope::parse_json_body;
use crate::errors::ProtocolError;
use crate::types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReplyMessage,
    ChatUsage,
};
use crate::AppState;

pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let request = match parse_json_body(&body) {
        Ok(body) => ChatCompletionRequest::from_json(&body),
        Err(err) => return chat_error(&err),
    };

    let user_text = match last_user_text(&request.messages) {
        Ok(text) => text,
        Err(err) => return chat_error(&err),
    };

    let reply = state.reply.reply(user_text);
    let model = request
        .model
        .filter(|model| !model.trim().is_empty())
        .unwrap_or_else(|| state.config.model_name.clone());

    info!("Chat completion for model {}", model);
    ResponseJson(build_completion(&model, user_text, &reply)).into_response()
}

fn chat_error(err: &ProtocolError) -> Response {
    debug!("Rejected chat completion: {}", err);
    let body = match err {
        ProtocolError::ParseError(_) => {
            json!({ "error": { "code": err.code(), "message": err.to_string() } })
        }
        _ => json!({ "error": { "message": err.to_string() } }),
    };
    (StatusCode::BAD_REQUEST, ResponseJson(body)).into_response()
}

/// Content of the last `user` message, scanning from the end. Blank or
/// non-string content counts as no message.
pub fn last_user_text(messages: &[ChatMessage]) -> Result<&str, ProtocolError> {
    messages
        .iter()
        .rev()
        .find(|message| message.role == "user")
        .and_then(|message| message.content.as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ProtocolError::NoUserMessage)
}

/// Whitespace-separated word count; not a real tokenizer.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn build_completion(model: &str, prompt: &str, reply: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
        object: "chat.completion",
        created: chrono::Utc::now().timestamp(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatReplyMessage {
                role: "assistant",
                content: reply.to_string(),
            },
            finish_reason: "stop",
        }],
        usage: ChatUsage {
            prompt_tokens: word_count(prompt),
            completion_tokens: word_count(reply),
            // Always zero; only the two counts above are computed.
            total_tokens: 0,
        },
    }
}
