//! Server startup: router assembly and the serve loop.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    ui::{
        handler::{health_check, registry_state, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the application router around the given state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/state", get(registry_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C / SIGTERM
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve(listener, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// Each call builds a fresh, empty Registry.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!("Server is running on http://{}", local_addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", local_addr);

    let app = build_router(Arc::new(AppState::new()));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
