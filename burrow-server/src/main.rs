//! burrow-server: serves indoor routes over HTTP.
//!
//! Reads its configuration from a TOML file (`--config`, default
//! `burrow.toml`). `RUST_LOG` controls log filtering.

use burrow_core::create_network;
use burrow_server::{AppState, Args, ServerConfig, StartupError, build_router};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,burrow_server=debug".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = ServerConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    let network = create_network(&config.network)?;
    tracing::info!(
        "Loaded network with {} locations and {} entry points",
        network.adjacency.location_count(),
        network.directory.len()
    );

    let state = AppState::new(network, config.default_preference);
    let app = build_router(
        state,
        config.request_timeout(),
        config.max_concurrent_requests,
    );

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("burrow-server listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("burrow-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
