use anyhow::{anyhow, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use hello_a2a::{create_router, AgentConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("hello_a2a=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let config = AgentConfig::load().await?;
    info!(
        "Starting {} ({} v{})",
        config.agent_name, config.agent_id, config.agent_version
    );

    if config.public_url.is_none() {
        warn!("PUBLIC_URL not set - discovery links will use the request host");
    }

    let addr = config.bind_address();
    let app = create_router(AppState::with_echo(config)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;
    info!("Agent listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Agent stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
