//! # HTTP Server
//!
//! Serves `/metrics` for Prometheus plus liveness and readiness probes.
//! Handlers only read the shared metrics registry.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::observability::metrics::ExporterMetrics;

/// State shared with the HTTP handlers
#[derive(Debug)]
pub struct ServerState {
    pub metrics: Arc<ExporterMetrics>,
    /// Set once the listener is bound
    pub is_ready: AtomicBool,
}

impl ServerState {
    pub fn new(metrics: Arc<ExporterMetrics>) -> Self {
        Self {
            metrics,
            is_ready: AtomicBool::new(false),
        }
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn metrics_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!("Failed to render metrics: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render metrics").into_response()
        }
    }
}

async fn liveness_handler() -> &'static str {
    "OK"
}

async fn readiness_handler(State(state): State<Arc<ServerState>>) -> Response {
    if state.is_ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "READY").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY").into_response()
    }
}

/// Bind `0.0.0.0:port` and serve until `shutdown` completes
///
/// Marks the state ready once the listener is bound.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn start_server<F>(port: u16, state: Arc<ServerState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;

    info!("HTTP server listening on {}", addr);
    state.is_ready.store(true, Ordering::Relaxed);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}
