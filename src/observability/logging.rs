//! # Logging
//!
//! Tracing subscriber setup. `RUST_LOG` takes precedence over the default filter.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "electricity_exporter=info,tower_http=info";

/// Install the global fmt subscriber
///
/// Safe to call more than once; later calls are ignored with a warning.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        tracing::warn!("Tracing subscriber already initialized: {}", e);
    }
}
