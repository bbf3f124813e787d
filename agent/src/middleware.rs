//! Request extractors for the agent server
//!
//! Resolves the base URLs that discovery documents and the greeting actions
//! need, so handlers never read configuration or headers ad hoc.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AgentConfig;
use crate::AppState;

/// Externally reachable base URL: `PUBLIC_URL`, else the request origin.
///
/// # Example
/// ```ignore
/// async fn manifest(PublicBaseUrl(base): PublicBaseUrl) -> Json<Value> {
///     Json(json!({ "endpointBaseUrl": base }))
/// }
/// ```
pub struct PublicBaseUrl(pub String);

/// Backend base URL: `A2A_BACKEND_BASE`, else `PUBLIC_URL`, else the
/// request origin.
pub struct BackendBaseUrl(pub String);

impl FromRequestParts<Arc<AppState>> for PublicBaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(PublicBaseUrl(resolve_public_base_url(
            &state.config,
            &parts.headers,
        )))
    }
}

impl FromRequestParts<Arc<AppState>> for BackendBaseUrl {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(BackendBaseUrl(resolve_backend_base_url(
            &state.config,
            &parts.headers,
        )))
    }
}

pub fn resolve_public_base_url(config: &AgentConfig, headers: &HeaderMap) -> String {
    match config.public_url.as_deref() {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => request_base_url(config, headers),
    }
}

pub fn resolve_backend_base_url(config: &AgentConfig, headers: &HeaderMap) -> String {
    match config.backend_base.as_deref().or(config.public_url.as_deref()) {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => request_base_url(config, headers),
    }
}

/// Origin of the inbound request from the `Host` header, falling back to
/// the bind address. `X-Forwarded-*` headers are only read when
/// `trust_forwarded_headers` is set.
pub fn request_base_url(config: &AgentConfig, headers: &HeaderMap) -> String {
    let first_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let forwarded = |name: &str| {
        if config.trust_forwarded_headers {
            first_value(name)
        } else {
            None
        }
    };

    let scheme = forwarded("x-forwarded-proto").unwrap_or_else(|| "http".to_string());
    let host = forwarded("x-forwarded-host")
        .or_else(|| first_value(header::HOST.as_str()))
        .unwrap_or_else(|| {
            let host = if config.host == "0.0.0.0" {
                "127.0.0.1"
            } else {
                config.host.as_str()
            };
            format!("{}:{}", host, config.port)
        });

    format!("{}://{}", scheme, host)
        .trim_end_matches('/')
        .to_string()
}
