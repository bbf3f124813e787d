//! Custom error types for the agent server
//!
//! Protocol errors are reported to the caller as structured JSON with a 4xx
//! status. Transport errors come from the outbound envelope call and are
//! recovered from by the greeting actions.

use std::fmt;

use crate::constants::protocol;

/// Failures of the message endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Request body was not valid JSON
    ParseError(String),

    /// `method` was something other than `message/send`
    UnsupportedMethod(String),

    /// No part carried text, or the text was blank after trimming
    NoTextFound,

    /// The JSON-RPC `jsonrpc` field was missing or not `"2.0"`
    InvalidEnvelope(String),

    /// Chat-completion request had no user message
    NoUserMessage,
}

/// Failures of the outbound `/a2a` call
#[derive(Debug)]
pub enum TransportError {
    /// Request did not complete within the configured timeout
    Timeout { url: String },

    /// Connection or request building failed
    ConnectionFailed { url: String, reason: String },

    /// Backend answered with a non-2xx status
    HttpStatus { url: String, status: u16 },

    /// Backend answered 2xx but the body was not JSON
    InvalidResponse { url: String, reason: String },
}

impl ProtocolError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        match self {
            ProtocolError::ParseError(_) => protocol::PARSE_ERROR,
            ProtocolError::UnsupportedMethod(_) => protocol::METHOD_NOT_FOUND,
            ProtocolError::NoTextFound => protocol::INVALID_PARAMS,
            ProtocolError::InvalidEnvelope(_) => protocol::INVALID_REQUEST,
            ProtocolError::NoUserMessage => protocol::INVALID_PARAMS,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ParseError(reason) => write!(f, "Parse error: {}", reason),
            ProtocolError::UnsupportedMethod(method) => {
                write!(f, "Unsupported method: {}", method)
            }
            ProtocolError::NoTextFound => write!(f, "No text found in message parts"),
            ProtocolError::InvalidEnvelope(reason) => {
                write!(f, "Invalid JSON-RPC envelope: {}", reason)
            }
            ProtocolError::NoUserMessage => write!(f, "No user message found"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Timeout { url } => write!(f, "Timeout while calling {}", url),
            TransportError::ConnectionFailed { url, reason } => {
                write!(f, "Connection to {} failed: {}", url, reason)
            }
            TransportError::HttpStatus { url, status } => {
                write!(f, "Backend {} returned status {}", url, status)
            }
            TransportError::InvalidResponse { url, reason } => {
                write!(f, "Invalid response from {}: {}", url, reason)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl std::error::Error for TransportError {}

impl TransportError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            TransportError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            TransportError::InvalidResponse {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            TransportError::ConnectionFailed {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }
}
