//! Keep-alive HTTP stub so hosting platforms see the process as live.

use axum::Router;
use axum::routing::get;
use tracing::{info, warn};

/// Spawn the keep-alive server as a background task.
pub fn spawn(port: u16) {
    tokio::spawn(async move {
        if let Err(e) = serve(port).await {
            warn!("keep-alive server exited: {e}");
        }
    });
}

async fn serve(port: u16) -> std::io::Result<()> {
    let app = Router::new().route("/health", get(health_handler));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("keep-alive listening on http://0.0.0.0:{port}/health");
    axum::serve(listener, app).await
}

async fn health_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "service": "threadgate",
    }))
}
