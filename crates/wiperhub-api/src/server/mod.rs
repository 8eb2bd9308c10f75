//! Server wiring: shared state, router, and runtime.

mod router;
mod types;

pub use router::create_router_with_state;
pub use types::ServerState;

use std::net::SocketAddr;

/// Run the API server until ctrl-c.
pub async fn run(addr: SocketAddr, state: ServerState) -> std::io::Result<()> {
    let app = create_router_with_state(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("wiperhub API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
