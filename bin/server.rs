// Street Cats - Web Server
// Cats on the Street API: config, logging, listen

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use street_cats::{app, ServerConfig, VERSION};

/// RUST_LOG wins over --log-level when set
fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    initialize_tracing(&config.log_level);

    if !config.static_dir.is_dir() {
        tracing::warn!(static_dir = ?config.static_dir, "static directory not found, only the API will be served");
    }

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(version = VERSION, "Server is running on http://{}", addr);
    tracing::info!("API: http://{}/cats", addr);
    tracing::info!("Docs: http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app(&config))
        .await
        .context("Failed to start server")?;

    Ok(())
}
