//! # Initialization
//!
//! Exporter startup: tracing, configuration, zone validation, metrics
//! registration, and upstream client construction.
//!
//! Everything that can be misconfigured fails here, before the HTTP server
//! binds, so a broken deployment never serves an empty `/metrics`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use super::RefreshLoop;
use crate::config::{self, ExporterConfig, ServerConfig};
use crate::observability;
use crate::observability::metrics::ExporterMetrics;
use crate::sources::{ElectricityMapsClient, HttpFetcher, NorgesBankClient};
use crate::zones::resolve_zones;

/// Initialization result containing all components needed to run the exporter
#[derive(Debug)]
pub struct InitializationResult {
    pub server_config: ServerConfig,
    /// Shared with the HTTP server and the refresh loop
    pub metrics: Arc<ExporterMetrics>,
    pub refresh_loop: RefreshLoop,
}

/// Initialize the exporter from the process environment
///
/// # Errors
///
/// Fails if the API key is missing, a zone is unknown, or metrics or the HTTP
/// client cannot be created.
pub fn initialize() -> Result<InitializationResult> {
    observability::logging::init_tracing();

    info!("Starting electricity exporter v{}", env!("CARGO_PKG_VERSION"));

    let (exporter_config, server_config) =
        config::load_config().context("Invalid configuration")?;
    info!("Configuration: {:?}", exporter_config);

    let (metrics, refresh_loop) = build(&exporter_config)?;

    Ok(InitializationResult {
        server_config,
        metrics,
        refresh_loop,
    })
}

/// Build the metrics registry and the refresh loop from a loaded configuration
///
/// # Errors
///
/// Fails if a zone is unknown, the API key is not a valid header value, or
/// metrics or the HTTP client cannot be created.
pub fn build(config: &ExporterConfig) -> Result<(Arc<ExporterMetrics>, RefreshLoop)> {
    let zones = resolve_zones(&config.zones).context("Invalid zone configuration")?;
    info!(
        "Polling zones: {}",
        zones
            .iter()
            .map(|zone| format!("{} ({})", zone.id, zone.display_name))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let metrics = Arc::new(ExporterMetrics::new()?);

    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let grid = ElectricityMapsClient::new(fetcher.clone(), &config.api_key, &config.endpoints)?;
    let exchange = NorgesBankClient::new(fetcher, config.endpoints.exchange_rate.clone());

    let refresh_loop = RefreshLoop::new(
        Arc::new(grid),
        Arc::new(exchange),
        Arc::clone(&metrics),
        zones,
        config.update_interval(),
    );

    Ok((metrics, refresh_loop))
}
