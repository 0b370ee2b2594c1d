//! # Metrics Module
//!
//! Prometheus metrics for the exporter, organized by responsibility.
//!
//! ## Sub-modules
//!
//! - `registry` - The registry object shared by the refresh loop and the HTTP handler
//! - `grid_metrics` - Published zone gauges and the health gauge (dashboard contract)
//! - `refresh_metrics` - Refresh loop operational metrics (cycles, skips, durations)

pub mod grid_metrics;
pub mod refresh_metrics;
pub mod registry;

pub use grid_metrics::GridMetrics;
pub use refresh_metrics::{CycleOutcome, RefreshMetrics};
pub use registry::ExporterMetrics;
