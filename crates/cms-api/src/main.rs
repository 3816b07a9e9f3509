//! # cms-api: Binary Entry Point
//!
//! Loads configuration, bootstraps the registry and storage provider, and
//! serves the API on `0.0.0.0:<port>` until Ctrl-C.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cms_api::config::AppConfig;

/// Schema-driven content API server.
#[derive(Parser, Debug)]
#[command(name = "cms-api", version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to /etc/cms/config.yaml, then ./config.yaml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen port. Overrides the config file and PORT.
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let (path, mut config) =
        AppConfig::discover(cli.config.as_deref()).context("loading configuration")?;
    config
        .apply_env(|name| std::env::var(name).ok())
        .context("applying environment overrides")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    tracing::info!(path = %path.display(), "configuration loaded");

    let state = cms_api::bootstrap::build_state(&config)
        .await
        .context("bootstrapping server")?;
    let app = cms_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "cms api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("unable to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
