//! # Electricity Maps Client
//!
//! Latest carbon intensity, carbon-free share and day-ahead price per zone.
//! Every request carries the API key in the `auth-token` header.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use super::{GridDataSource, GridSignal, HttpFetcher};
use crate::config::EndpointConfig;
use crate::constants::AUTH_TOKEN_HEADER;
use crate::zones::Zone;

#[derive(Debug, Clone)]
pub struct ElectricityMapsClient {
    fetcher: HttpFetcher,
    auth_headers: HeaderMap,
    carbon_intensity_url: String,
    carbon_free_url: String,
    price_day_ahead_url: String,
}

impl ElectricityMapsClient {
    /// # Errors
    ///
    /// Returns an error if the API key is not a valid header value.
    pub fn new(fetcher: HttpFetcher, api_key: &str, endpoints: &EndpointConfig) -> Result<Self> {
        let mut token = HeaderValue::from_str(api_key)
            .context("API key contains characters not allowed in an HTTP header")?;
        token.set_sensitive(true);

        let mut auth_headers = HeaderMap::new();
        auth_headers.insert(AUTH_TOKEN_HEADER, token);

        Ok(Self {
            fetcher,
            auth_headers,
            carbon_intensity_url: endpoints.carbon_intensity.clone(),
            carbon_free_url: endpoints.carbon_free.clone(),
            price_day_ahead_url: endpoints.price_day_ahead.clone(),
        })
    }

    /// Request URL for `signal` in `zone`
    pub fn url_for(&self, signal: GridSignal, zone: &Zone) -> String {
        let template = match signal {
            GridSignal::CarbonIntensity => &self.carbon_intensity_url,
            GridSignal::CarbonFree => &self.carbon_free_url,
            GridSignal::DayAheadPrice => &self.price_day_ahead_url,
        };
        template.replace("{zone}", &zone.id)
    }
}

#[async_trait]
impl GridDataSource for ElectricityMapsClient {
    async fn latest(&self, signal: GridSignal, zone: &Zone) -> Option<Value> {
        let url = self.url_for(signal, zone);
        self.fetcher
            .fetch_json(&url, Some(self.auth_headers.clone()))
            .await
    }
}
