// src/server/mod.rs
//! HTTP surface: the converter page, the export endpoint and generated
//! files.

mod handlers;
mod page;

use crate::constants::{ARTIFACT_SWEEP_INTERVAL_SECS, ARTIFACT_TTL_SECS, PUBLIC_TMP_PREFIX};
use crate::error::AppError;
use crate::export::ExportAction;
use crate::output::ExportWorkspace;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;

/// Shared, read-only state of the server.
pub struct AppState {
    pub export: ExportAction,
}

/// Builds the application router.
///
/// Files under the export workspace are served at `/tmp`.
pub fn create_router(state: Arc<AppState>) -> Router {
    let files = ServeDir::new(state.export.workspace().root());

    Router::new()
        .route("/", get(handlers::converter_page))
        .route("/api/export", post(handlers::export))
        .route("/health", get(handlers::health))
        .nest_service(PUBLIC_TMP_PREFIX, files)
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
///
/// Request directories older than [`ARTIFACT_TTL_SECS`] are swept in the
/// background while the server runs.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<(), AppError> {
    let workspace = state.export.workspace().clone();
    workspace.ensure_root().await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    let sweeper = spawn_artifact_sweeper(workspace);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served?;

    log::info!("Server stopped");
    Ok(())
}

fn spawn_artifact_sweeper(workspace: ExportWorkspace) -> tokio::task::JoinHandle<()> {
    let max_age = Duration::from_secs(ARTIFACT_TTL_SECS);
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(Duration::from_secs(ARTIFACT_SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;

            if let Err(e) = workspace.remove_stale(max_age).await {
                log::warn!("Could not sweep {}: {}", workspace.root().display(), e);
            }
        }
    })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received, stopping server..."),
        Err(e) => log::error!("Failed to listen for Ctrl-C: {}", e),
    }
}
