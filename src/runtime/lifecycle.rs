//! # Lifecycle
//!
//! Runs the HTTP server and the refresh loop until a shutdown signal, then
//! stops both and waits for the loop to unwind.

use anyhow::{anyhow, Result};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::InitializationResult;
use crate::server::{start_server, ServerState};

/// Serve until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the HTTP server fails to start or stops unexpectedly.
pub async fn run(init: InitializationResult) -> Result<()> {
    let InitializationResult {
        server_config,
        metrics,
        refresh_loop,
    } = init;

    let shutdown = CancellationToken::new();
    let server_state = Arc::new(ServerState::new(metrics));

    let mut server_handle = tokio::spawn(start_server(
        server_config.metrics_port,
        Arc::clone(&server_state),
        shutdown.clone().cancelled_owned(),
    ));

    if let Err(e) = wait_for_server_ready(
        &server_state,
        &server_handle,
        Duration::from_secs(server_config.startup_timeout_secs),
        Duration::from_millis(server_config.poll_interval_ms),
    )
    .await
    {
        shutdown.cancel();
        return Err(match server_handle.await {
            Ok(Err(server_error)) => server_error,
            _ => e,
        });
    }

    let loop_handle = tokio::spawn(refresh_loop.run(shutdown.child_token()));

    let server_result = tokio::select! {
        () = shutdown_signal() => None,
        result = &mut server_handle => Some(result),
    };

    shutdown.cancel();
    if let Err(e) = loop_handle.await {
        error!("Refresh loop ended abnormally: {}", e);
    }

    let server_result = match server_result {
        Some(result) => result,
        None => server_handle.await,
    };
    info!("Shutdown");

    match server_result {
        Ok(result) => result,
        Err(e) => Err(anyhow!("HTTP server task failed: {e}")),
    }
}

/// Wait for the HTTP server to become ready
async fn wait_for_server_ready(
    server_state: &ServerState,
    server_handle: &JoinHandle<Result<()>>,
    startup_timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow!("HTTP server failed to start"));
        }

        if server_state.is_ready.load(Ordering::Relaxed) {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Completes on Ctrl+C or, on unix, SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        () = terminate => info!("Received terminate signal, initiating graceful shutdown"),
    }
}
