//! Reply generation backends.

/// Turns the user's trimmed text into the agent's reply.
pub trait ReplyGenerator: Send + Sync {
    fn reply(&self, text: &str) -> String;
}

/// Deterministic echo backend: `prefix + text`.
#[derive(Debug, Clone, Default)]
pub struct EchoReply {
    prefix: String,
}

impl EchoReply {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ReplyGenerator for EchoReply {
    fn reply(&self, text: &str) -> String {
        format!("{}{}", self.prefix, text)
    }
}
