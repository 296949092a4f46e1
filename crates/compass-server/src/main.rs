//! Compass server binary
//!
//! Resolves the operating mode, wires the matching backend, and serves
//! until interrupted. Shutdown sweeps any remaining sessions so the active
//! count ends at zero.

use anyhow::Context;
use clap::Parser;
use compass_core::Mode;
use compass_server::{router, AppState, ServerConfig};
use compass_store::SqliteStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "compass", version, about = "Company directory server")]
struct Cli {
    /// Operating mode ("demo" or "local"); overrides env and config file
    #[arg(long)]
    mode: Option<Mode>,

    /// Listen address
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::resolve(cli.mode, cli.bind, cli.config.as_deref())?;
    tracing::info!(mode = %config.mode, "selected mode");

    let state = if config.mode.is_demo() {
        tracing::info!(
            max_sessions = config.max_sessions,
            timeout_secs = config.session_ttl.as_secs(),
            "demo mode: session limit and shortened timeout enabled"
        );
        AppState::demo(&config)
    } else {
        let store = SqliteStore::open(&config.db_path)
            .with_context(|| format!("opening database {}", config.db_path.display()))?;
        tracing::info!(db = %config.db_path.display(), "durable store ready");
        AppState::local(&config, Arc::new(store))
    };

    let sweeper = Arc::clone(state.sessions()).spawn_sweeper(config.sweep_interval);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    tracing::info!(addr = %config.bind, "listening");

    let sessions = Arc::clone(state.sessions());
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await
        .context("server error")?;

    // Shutdown sweep: every remaining session ends and is counted down
    sweeper.abort();
    sessions.shutdown();
    tracing::info!("all sessions ended, bye");
    Ok(())
}
