//! # Upstream Sources
//!
//! Clients for the data the exporter republishes.
//!
//! ## Sub-modules
//!
//! - `http` - Shared GET-and-parse-JSON helper with timeout and logging
//! - `electricity_maps` - Carbon intensity, carbon-free share and day-ahead price per zone
//! - `norges_bank` - EUR/NOK exchange rate from the Norges Bank SDMX API
//!
//! Both source kinds sit behind traits so the refresh loop can be driven by
//! in-memory fakes in tests. Absent data is `None`, never an error.

pub mod electricity_maps;
pub mod http;
pub mod norges_bank;

pub use electricity_maps::ElectricityMapsClient;
pub use http::HttpFetcher;
pub use norges_bank::NorgesBankClient;

use async_trait::async_trait;
use std::fmt;

use crate::zones::Zone;

/// Per-zone readings published by the grid data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridSignal {
    CarbonIntensity,
    CarbonFree,
    DayAheadPrice,
}

impl GridSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            GridSignal::CarbonIntensity => "carbon_intensity",
            GridSignal::CarbonFree => "carbon_free",
            GridSignal::DayAheadPrice => "price_day_ahead",
        }
    }
}

impl fmt::Display for GridSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest per-zone payloads from the grid data provider
#[async_trait]
pub trait GridDataSource: Send + Sync {
    /// Raw JSON payload for `signal` in `zone`, or `None` if the fetch failed
    async fn latest(&self, signal: GridSignal, zone: &Zone) -> Option<serde_json::Value>;
}

/// EUR to NOK exchange rate
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// Most recent published rate, or `None` if it could not be resolved
    async fn exchange_rate(&self) -> Option<f64>;
}
