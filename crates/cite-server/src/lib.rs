//! # cite-server
//!
//! axum HTTP surface over the citation audit pipeline.
//!
//! | Route          | Method | Response                                  |
//! |----------------|--------|-------------------------------------------|
//! | `/verify`      | POST   | `VerificationResult` JSON, or `{error}`   |
//! | `/health`      | GET    | `{status, version}`                       |
//!
//! Other methods on these paths get `405 Method Not Allowed` from the router.

pub mod error;
mod handlers;

pub use handlers::{Health, VerifyRequest};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use cite_audit::Auditor;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared per-process state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
    /// Upper bound on one pipeline run.
    pub request_timeout: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(auditor: Auditor, request_timeout: Duration) -> Self {
        Self {
            auditor: Arc::new(auditor),
            request_timeout,
        }
    }
}

/// Build the router with tracing middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "citecheck server listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
