//! # Electricity Exporter
//!
//! A Prometheus exporter for electricity grid data in the Norwegian bidding zones.
//!
//! ## Overview
//!
//! Every refresh cycle the exporter:
//!
//! 1. **Resolves EUR/NOK** - Latest spot rate from the Norges Bank SDMX API
//! 2. **Fetches zone data** - Carbon intensity, carbon-free share and day-ahead price from Electricity Maps
//! 3. **Converts prices** - EUR/MWh to NOK/kWh
//! 4. **Publishes gauges** - Served on `/metrics` for Prometheus to scrape
//!
//! Zones with incomplete data keep their last published values. `electricity_exporter_up`
//! reports whether the last cycle succeeded.
//!
//! ## Configuration
//!
//! `API_KEY_ELECTRICITYMAP` is required. See `config` for optional variables.

use anyhow::Result;
use electricity_exporter::runtime::{initialize, run};

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize()?;
    run(init).await
}
