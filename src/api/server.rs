//! HTTP server lifecycle — binds the listener, mounts the API router and
//! runs until a shutdown signal arrives.

use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

/// Bind `addr` and serve the API until ctrl-c.
pub async fn serve(addr: &str, ctx: ApiContext) -> Result<(), String> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Cannot bind {addr}: {e}"))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Cannot read local address: {e}"))?;
    tracing::info!("API listening on http://{local_addr}");

    axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
