//! # Metrics Endpoint Tests
//!
//! Exercise the HTTP router: `/metrics` exposition and the probes.

use axum::http::StatusCode;
use axum_test::TestServer;
use electricity_exporter::observability::metrics::grid_metrics::ZoneReading;
use electricity_exporter::observability::metrics::ExporterMetrics;
use electricity_exporter::server::{router, ServerState};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn test_server() -> (TestServer, Arc<ServerState>) {
    let metrics = Arc::new(ExporterMetrics::new().expect("metrics should build"));
    let state = Arc::new(ServerState::new(metrics));
    let server = TestServer::new(router(Arc::clone(&state))).expect("test server should start");
    (server, state)
}

#[tokio::test]
async fn test_metrics_exposition() {
    let (server, state) = test_server();
    state.metrics.grid.set_zone(
        "North-Norway",
        ZoneReading {
            carbon_intensity: 18.0,
            renewable_share: 99.1,
            price_nok_per_kwh: 0.05,
        },
    );
    state.metrics.grid.set_up(true);

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type"),
        "text/plain; version=0.0.4"
    );
    let body = response.text();
    assert!(body.contains("grid_carbon_intensity_stats{zone=\"North-Norway\"} 18"));
    assert!(body.contains("grid_renewable_percentage{zone=\"North-Norway\"} 99.1"));
    assert!(body.contains("electricity_price_nok_per_kwh{zone=\"North-Norway\"} 0.05"));
    assert!(body.contains("electricity_exporter_up 1"));
}

#[tokio::test]
async fn test_metrics_before_first_cycle() {
    let (server, _state) = test_server();

    let response = server.get("/metrics").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("electricity_exporter_up 0"));
    assert!(!body.contains("grid_carbon_intensity_stats{"));
}

#[tokio::test]
async fn test_liveness() {
    let (server, _state) = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_readiness_follows_state() {
    let (server, state) = test_server();

    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    state.is_ready.store(true, Ordering::Relaxed);
    server.get("/readyz").await.assert_status_ok();
}
