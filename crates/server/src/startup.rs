use std::{future::Future, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::storage::SnapshotStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router around an already loaded store.
pub fn build_app(store: Arc<SnapshotStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Load the snapshot, bind the listener and serve until Ctrl+C.
///
/// A snapshot that exists but cannot be parsed aborts startup before anything
/// is served.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let data_file = cfg.storage.data_file.clone();
    common::env::ensure_data_dir(&data_file).await?;
    let store = SnapshotStore::load(&data_file, cfg.storage.id_policy).await?;

    let addr = cfg
        .server
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("cannot bind {addr}: {e}"))?;
    info!(%addr, data_file = %data_file.display(), "starting inventory server");

    serve(listener, store, shutdown_signal()).await?;
    Ok(())
}

/// Serve on `listener` until `shutdown` resolves, then flush the snapshot once
/// more so a write that failed earlier gets another chance.
pub async fn serve<F>(listener: TcpListener, store: Arc<SnapshotStore>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(Arc::clone(&store));
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    match store.save().await {
        Ok(()) => info!(path = %store.file_path().display(), "final snapshot written"),
        Err(e) => warn!(error = %e, "final snapshot write failed"),
    }
    Ok(())
}
