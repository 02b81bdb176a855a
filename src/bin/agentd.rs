//! agentd Binary
//!
//! Serves the property agent registry over HTTP.

use agentd::config::{ConfigLoader, ServiceConfig};
use agentd::http::{build_router, AppState};
use agentd::logging::init_logging;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "agentd", version, about = "Property agent registry service")]
struct Cli {
    /// Config file (defaults to ./agentd.toml when present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Bind host, overrides config
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides config
    #[arg(long, short)]
    port: Option<u16>,
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigLoader::load().context("Failed to load config")?,
    };
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(Some(&config.logging))?;

    let addr = config.server.bind_addr();
    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state, config.server.body_limit_bytes);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
