pub mod config;
pub mod constants;
pub mod envelope;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;

use anyhow::{Context, Result};
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::AgentConfig;
pub use errors::{ProtocolError, TransportError};
pub use services::{A2aClient, EchoReply, ReplyGenerator};

// Application state
pub struct AppState {
    pub config: AgentConfig,
    pub reply: Arc<dyn ReplyGenerator>,
    /// Shared by every outbound backend call; carries the backend timeout.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AgentConfig, reply: Arc<dyn ReplyGenerator>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.backend_timeout())
            .build()
            .context("Failed to build backend HTTP client")?;

        Ok(Self {
            config,
            reply,
            http_client,
        })
    }

    /// State with the echo backend configured by `reply_prefix`.
    pub fn with_echo(config: AgentConfig) -> Result<Self> {
        let reply = Arc::new(EchoReply::new(config.reply_prefix.clone()));
        Self::new(config, reply)
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        // === MESSAGE ROUTES ===
        .route("/a2a", post(handlers::messages::a2a_send))
        .route("/rpc", post(handlers::messages::rpc_send))
        .route(
            "/openai/v1/chat/completions",
            post(handlers::openai::chat_completions),
        )
        // === HEALTH ROUTES ===
        .route("/health", get(handlers::health::health))
        .route("/healthz", get(handlers::health::health))
        .route("/readyz", get(handlers::health::ready))
        // === DISCOVERY ROUTES ===
        .route(
            "/.well-known/agent-card.json",
            get(handlers::discovery::agent_card),
        )
        .route("/a2a/manifest", get(handlers::discovery::manifest))
        .route("/openapi.json", get(handlers::discovery::openapi))
        .route("/a2a/agents", get(handlers::discovery::agents_directory))
        .route(
            "/.well-known/ica4aa/agents",
            get(handlers::discovery::well_known_agents),
        )
        .route("/api/v1/agents", get(handlers::discovery::well_known_agents))
        // === ACTION ROUTES ===
        .route("/a2a/actions/say_hello", post(handlers::actions::say_hello))
        .route(
            "/api/v1/agents/{agent_id}/invoke",
            post(handlers::actions::invoke_agent),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
