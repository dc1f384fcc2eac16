use anyhow::{Context, Result};
use clap::Parser;
use playlistd::{AppState, ServerConfig, SnapshotManager, build_router, restore_playlist};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    let snapshots = Arc::new(SnapshotManager::new(config.snapshot_path()));
    let playlist = Arc::new(Mutex::new(restore_playlist(&snapshots)));

    let app = build_router(AppState::new(playlist.clone(), snapshots.clone()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, data_dir = %config.data_dir.display(), "playlistd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Final flush so the snapshot matches the in-memory state at exit.
    let playlist = playlist.lock().await;
    snapshots
        .save(&playlist.songs(), playlist.len())
        .context("final snapshot flush failed")?;
    info!(count = playlist.len(), "playlist flushed, shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
