//! TarotWhisper chat proxy.

use tarot_proxy::{app, AppState, ProxyConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ProxyConfig::from_env()?;
    if config.is_available() {
        info!(model = config.default_model(), "Default LLM configuration enabled");
    } else {
        warn!("Default LLM configuration disabled or incomplete; /api/chat will return 503");
    }

    let addr = config.addr;
    let app = app(AppState::new(config));

    info!(addr = %addr, "Proxy listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
