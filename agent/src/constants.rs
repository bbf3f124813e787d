//! Application-wide constants for protocol literals, timeouts, and defaults
//!
//! Grouped by category so handlers and the outbound client share a single
//! source of truth for JSON-RPC codes and agent metadata defaults.

use std::time::Duration;

/// A2A / JSON-RPC protocol literals
pub mod protocol {
    /// The only method the message endpoints accept
    pub const MESSAGE_SEND: &str = "message/send";

    /// Required value of the `jsonrpc` field on `/rpc`
    pub const JSONRPC_VERSION: &str = "2.0";

    /// Request body was not valid JSON
    pub const PARSE_ERROR: i32 = -32700;

    /// Malformed JSON-RPC envelope
    pub const INVALID_REQUEST: i32 = -32600;

    /// Method other than `message/send`
    pub const METHOD_NOT_FOUND: i32 = -32601;

    /// Envelope carried no usable text
    pub const INVALID_PARAMS: i32 = -32602;

    /// Prefix for synthesized context ids
    pub const CONTEXT_ID_PREFIX: &str = "ctx-";
}

/// HTTP client timeout constants
pub mod http {
    use super::Duration;

    /// Default timeout for the local envelope call
    pub const BACKEND_TIMEOUT_SECONDS: u64 = 20;

    pub const BACKEND_TIMEOUT: Duration = Duration::from_secs(BACKEND_TIMEOUT_SECONDS);
}

/// Defaults for the agent identity advertised by discovery routes
pub mod agent {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_ID: &str = "hello-world";
    pub const DEFAULT_NAME: &str = "Hello World";
    pub const DEFAULT_VERSION: &str = "1.2.0";
    pub const DEFAULT_DESCRIPTION: &str = "Universal A2A Hello";
    pub const DEFAULT_TAGS: [&str; 2] = ["demo", "tutorial"];
    pub const DEFAULT_REPLY_PREFIX: &str = "Hello, you said: ";
    pub const DEFAULT_MODEL_NAME: &str = "universal-a2a-hello";

    /// Name used by the greeting actions when the caller omits one
    pub const FALLBACK_NAME: &str = "World";
}
