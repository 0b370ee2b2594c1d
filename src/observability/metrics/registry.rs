//! # Metrics Registry
//!
//! The exporter's Prometheus registry and every metric registered on it.
//!
//! One `ExporterMetrics` is built at startup and shared through an `Arc`: the
//! refresh loop writes gauges, the `/metrics` handler renders a snapshot.
//! Prometheus metrics are internally synchronized, so no extra locking is needed.

use anyhow::{Context, Result};
use prometheus::{Encoder, Registry, TextEncoder};

use super::{GridMetrics, RefreshMetrics};

#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Registry,
    pub grid: GridMetrics,
    pub refresh: RefreshMetrics,
}

impl std::fmt::Debug for ExporterMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExporterMetrics")
            .field("grid", &self.grid)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl ExporterMetrics {
    /// Create all metrics and register them on a fresh registry
    ///
    /// # Errors
    ///
    /// Returns an error if a metric definition is invalid or registered twice.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let grid = GridMetrics::new().context("Failed to create grid metrics")?;
        grid.register(&registry)
            .context("Failed to register grid metrics")?;

        let refresh = RefreshMetrics::new().context("Failed to create refresh metrics")?;
        refresh
            .register(&registry)
            .context("Failed to register refresh metrics")?;

        Ok(Self {
            registry,
            grid,
            refresh,
        })
    }

    /// Render the current snapshot in the Prometheus text exposition format
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not valid UTF-8")
    }
}
