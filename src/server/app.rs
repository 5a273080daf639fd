//! Axum application setup.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::dispatch::Dispatcher;
use crate::error::Result;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sentiment", post(handlers::sentiment))
        .route("/insights", post(handlers::insights))
        .route("/summarize", post(handlers::summarize))
        .route("/process", post(handlers::process))
        .route("/models", get(handlers::list_models));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api/ai", api_routes)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn run_server(dispatcher: Arc<Dispatcher>, addr: &str) -> Result<()> {
    let app = create_router(AppState::from(dispatcher));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %listener.local_addr()?, "Quill gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Quill gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
