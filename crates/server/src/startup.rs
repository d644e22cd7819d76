use std::future::Future;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;
use service::runtime;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router for an already opened repository.
pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve `app` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}

/// Public entry: open storage, build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let repo = runtime::open_repository(&cfg)
        .await
        .map_err(|e| StartupError::Storage(e.to_string()))?;
    let app = build_app(AppState::new(repo));

    let addr = cfg.bind_addr().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "starting address book server");
    serve(listener, app, ctrl_c()).await
}
