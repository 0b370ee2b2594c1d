//! # Constants
//!
//! Default values for exporter and server configuration.

/// Environment variable holding the Electricity Maps API key
pub const API_KEY_ENV: &str = "API_KEY_ELECTRICITYMAP";

/// Default HTTP port for `/metrics` and probes
pub const DEFAULT_METRICS_PORT: u16 = 8000;

/// Default time between refresh cycles (seconds)
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 60;

/// Default timeout for a single upstream request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default server startup timeout (seconds)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default server readiness poll interval (milliseconds)
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Zones polled when `EXPORTER_ZONES` is not set
pub const DEFAULT_ZONES: [&str; 5] = ["NO-NO1", "NO-NO2", "NO-NO3", "NO-NO4", "NO-NO5"];

/// Display names keyed by zone short code
pub const ZONE_NAMES: [(&str, &str); 5] = [
    ("NO1", "Southeast-Norway"),
    ("NO2", "Southwest-Norway"),
    ("NO3", "Central-Norway"),
    ("NO4", "North-Norway"),
    ("NO5", "West-Norway"),
];

// Upstream endpoint templates. `{zone}`, `{start}` and `{end}` are substituted per request.
pub const DEFAULT_CARBON_INTENSITY_URL: &str =
    "https://api.electricitymap.org/v3/carbon-intensity/latest?zone={zone}";
pub const DEFAULT_CARBON_FREE_URL: &str =
    "https://api.electricitymaps.com/v3/carbon-free-energy/latest?zone={zone}";
pub const DEFAULT_PRICE_DAY_AHEAD_URL: &str =
    "https://api.electricitymaps.com/v3/price-day-ahead/latest?zone={zone}";
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://data.norges-bank.no/api/data/EXR/B.EUR.NOK.SP?format=sdmx-json&startPeriod={start}&endPeriod={end}&locale=no";

/// Header carrying the Electricity Maps API key
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Width of the exchange-rate lookup window (days)
pub const EXCHANGE_RATE_WINDOW_DAYS: i64 = 7;

/// SDMX series key for EUR/NOK spot in the Norges Bank response
pub const EXCHANGE_RATE_SERIES_KEY: &str = "0:0:0:0";

/// Upstream prices are per MWh, the exported gauge is per kWh
pub const KWH_PER_MWH: f64 = 1000.0;
