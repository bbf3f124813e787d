use axum::{
    extract::{Json, Path, State},
    response::Json as ResponseJson,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::middleware::BackendBaseUrl;
use crate::services::greeting::{greet, normalize_name};
use crate::services::A2aClient;
use crate::types::{SayHelloRequest, SayHelloResponse};
use crate::AppState;

pub async fn say_hello(
    State(state): State<Arc<AppState>>,
    BackendBaseUrl(backend): BackendBaseUrl,
    Json(request): Json<SayHelloRequest>,
) -> ResponseJson<SayHelloResponse> {
    ResponseJson(run_greeting(&state, &backend, request).await)
}

/// Invoke wrapper for discovery clients; the agent id is not checked.
pub async fn invoke_agent(
    Path(agent_id): Path<String>,
    State(state): State<Arc<AppState>>,
    BackendBaseUrl(backend): BackendBaseUrl,
    Json(request): Json<SayHelloRequest>,
) -> ResponseJson<SayHelloResponse> {
    debug!("Invoke requested for agent {}", agent_id);
    ResponseJson(run_greeting(&state, &backend, request).await)
}

async fn run_greeting(state: &AppState, backend: &str, request: SayHelloRequest) -> SayHelloResponse {
    let name = normalize_name(request.name.as_deref());
    info!("Greeting {} via {}", name, backend);

    let client = A2aClient::with_client(state.http_client.clone(), backend);
    SayHelloResponse {
        message: greet(&client, &name).await,
    }
}
