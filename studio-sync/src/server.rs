use crate::error::{SyncError, SyncResult};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub fn build_router(app_state: AppState) -> Router {
    let public = ServeDir::new(&app_state.config().public_dir);

    Router::new()
        .route("/update-studio", get(update_studio))
        .route("/health", get(health))
        .fallback_service(public)
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Binds `addr` and serves in the background. Returns the bound address, which
/// differs from `addr` when port 0 was requested.
pub async fn start_server(app_state: AppState, addr: SocketAddr) -> SyncResult<SocketAddr> {
    let app = build_router(app_state);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| SyncError::Bind { addr, source })?;
    let bound = listener
        .local_addr()
        .map_err(|source| SyncError::Bind { addr, source })?;

    tracing::info!("server listening on http://{}", bound);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("{}", SyncError::Serve(e));
        }
    });

    Ok(bound)
}

async fn update_studio(State(state): State<AppState>) -> impl IntoResponse {
    // Detached so a client hanging up does not cancel the cycle.
    let refresher = state.refresher.clone();
    let result = match tokio::spawn(async move { refresher.refresh().await }).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("refresh task aborted: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": e.to_string() })),
            );
        }
    };

    match result {
        Ok(count) => (StatusCode::OK, Json(json!({ "ok": true, "projects": count }))),
        Err(e) => {
            let status = match &e {
                SyncError::RefreshInProgress => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "ok": false, "error": e.to_string() })))
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
