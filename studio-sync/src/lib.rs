pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod refresh;
pub mod server;
pub mod snapshot;
pub mod state;

use config::Config;
use error::SyncResult;
use state::AppState;
use std::net::SocketAddr;

/// Starts the server, kicks off one background refresh, and runs until Ctrl-C.
pub async fn run(config: Config) -> SyncResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app_state = AppState::new(config)?;

    server::start_server(app_state.clone(), addr).await?;
    start_background_refresh(app_state);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("shutting down");
    Ok(())
}

/// Failures here are logged and dropped so a remote outage at boot does not stop serving.
pub fn start_background_refresh(app_state: AppState) {
    tokio::spawn(async move {
        if let Err(e) = app_state.refresher.refresh().await {
            tracing::warn!("initial refresh failed: {}", e);
        }
    });
}
