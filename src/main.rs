use std::sync::Arc;

use anyhow::Context;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use webhook_relay_chat::{
    config::ServerConfig,
    routes,
    state::AppState,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = ServerConfig::from_env()?;
    if config.webhook_url.resolve().is_none() {
        warn!(source = %config.webhook_url, "webhook URL is not set; relay calls will fail until it is");
    }

    let state = Arc::new(AppState::new(config.webhook_url.clone()));

    let mut app = routes::create_router().with_state(state);
    if let Some(dir) = config.static_dir.as_ref().filter(|dir| dir.is_dir()) {
        info!(dir = %dir.display(), "serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "webhook relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
