//! Electricity Exporter Library
//!
//! Polls Electricity Maps and Norges Bank for Norwegian grid zones and
//! republishes carbon intensity, renewable share and NOK/kWh price as
//! Prometheus gauges.

pub mod config;
pub mod constants;
pub mod error;
pub mod observability;
pub mod runtime;
pub mod server;
pub mod sources;
pub mod zones;

pub use error::{ConfigError, ExchangeRateError, ZoneUpdateError};
pub use zones::Zone;
