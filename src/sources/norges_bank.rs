//! # Norges Bank Exchange Rate
//!
//! Resolves the EUR/NOK spot rate from the Norges Bank SDMX-JSON API.
//!
//! The request covers the last seven days, so weekends and bank holidays
//! still return at least one business-day observation. The response is
//! decoded into typed structs; the rate is the first value of the
//! observation with the greatest key.
//!
//! Observation keys are compared as strings. The upstream keys are
//! zero-padded and sort chronologically that way; the comparison is kept
//! as-is rather than parsing them.

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

use super::{ExchangeRateSource, HttpFetcher};
use crate::constants::{EXCHANGE_RATE_SERIES_KEY, EXCHANGE_RATE_WINDOW_DAYS};
use crate::error::ExchangeRateError;

#[derive(Debug, Deserialize)]
struct SdmxMessage {
    data: SdmxData,
}

#[derive(Debug, Deserialize)]
struct SdmxData {
    #[serde(rename = "dataSets")]
    data_sets: Vec<SdmxDataSet>,
}

#[derive(Debug, Deserialize)]
struct SdmxDataSet {
    series: HashMap<String, SdmxSeries>,
}

#[derive(Debug, Deserialize)]
struct SdmxSeries {
    observations: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Clone)]
pub struct NorgesBankClient {
    fetcher: HttpFetcher,
    url_template: String,
}

impl NorgesBankClient {
    pub fn new(fetcher: HttpFetcher, url_template: impl Into<String>) -> Self {
        Self {
            fetcher,
            url_template: url_template.into(),
        }
    }

    /// Request URL for the window ending on `today`
    pub fn url_for(&self, today: NaiveDate) -> String {
        let (start, end) = exchange_rate_window(today);
        self.url_template
            .replace("{start}", &start.format("%Y-%m-%d").to_string())
            .replace("{end}", &end.format("%Y-%m-%d").to_string())
    }
}

#[async_trait]
impl ExchangeRateSource for NorgesBankClient {
    async fn exchange_rate(&self) -> Option<f64> {
        let url = self.url_for(Local::now().date_naive());
        let body = self.fetcher.fetch_json(&url, None).await?;
        parse_exchange_rate(body)
    }
}

/// Start and end dates of the lookup window ending on `today`
pub fn exchange_rate_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(EXCHANGE_RATE_WINDOW_DAYS), today)
}

/// Extract the latest rate from a response body, logging on unexpected layout
pub fn parse_exchange_rate(body: Value) -> Option<f64> {
    match latest_observation(body) {
        Ok(rate) => Some(rate),
        Err(e) => {
            error!("Exchange rate format: {}", e);
            None
        }
    }
}

fn latest_observation(body: Value) -> Result<f64, ExchangeRateError> {
    let message: SdmxMessage = serde_json::from_value(body)?;
    let data_set = message
        .data
        .data_sets
        .into_iter()
        .next()
        .ok_or(ExchangeRateError::NoDataSet)?;
    let series = data_set
        .series
        .get(EXCHANGE_RATE_SERIES_KEY)
        .ok_or(ExchangeRateError::MissingSeries(EXCHANGE_RATE_SERIES_KEY))?;

    let (date, values) = series
        .observations
        .last_key_value()
        .ok_or(ExchangeRateError::NoObservations)?;
    let value = values
        .first()
        .ok_or_else(|| ExchangeRateError::EmptyObservation { date: date.clone() })?;

    let rate = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ExchangeRateError::NonNumeric {
        date: date.clone(),
        value: value.clone(),
    })?;

    debug!("Exchange rate {} from observation {}", rate, date);
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sdmx(observations: Value) -> Value {
        json!({
            "meta": { "id": "test" },
            "data": {
                "dataSets": [{
                    "action": "Information",
                    "series": {
                        "0:0:0:0": {
                            "attributes": [0, 0, 0, 0],
                            "observations": observations
                        }
                    }
                }]
            }
        })
    }

    #[test]
    fn test_selects_greatest_key() {
        let body = sdmx(json!({
            "2024-01-01": [1.0],
            "2024-01-07": [2.0],
            "2024-01-03": [3.0]
        }));
        assert_eq!(parse_exchange_rate(body), Some(2.0));
    }

    #[test]
    fn test_selection_is_lexicographic() {
        // "9" sorts after "10" as a string, and that is what upstream relies on.
        let body = sdmx(json!({ "10": [1.0], "9": [2.0] }));
        assert_eq!(parse_exchange_rate(body), Some(2.0));
    }

    #[test]
    fn test_string_values_are_parsed() {
        let body = sdmx(json!({ "0": ["11.4235"], "4": ["11.5120"] }));
        assert_eq!(parse_exchange_rate(body), Some(11.512));
    }

    #[test]
    fn test_missing_series() {
        let body = json!({ "data": { "dataSets": [{ "series": {} }] } });
        assert!(matches!(
            latest_observation(body),
            Err(ExchangeRateError::MissingSeries("0:0:0:0"))
        ));
    }

    #[test]
    fn test_empty_data_sets() {
        let body = json!({ "data": { "dataSets": [] } });
        assert!(matches!(
            latest_observation(body),
            Err(ExchangeRateError::NoDataSet)
        ));
    }

    #[test]
    fn test_empty_observations() {
        assert!(matches!(
            latest_observation(sdmx(json!({}))),
            Err(ExchangeRateError::NoObservations)
        ));
    }

    #[test]
    fn test_empty_observation_value() {
        assert!(matches!(
            latest_observation(sdmx(json!({ "3": [] }))),
            Err(ExchangeRateError::EmptyObservation { date }) if date == "3"
        ));
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(matches!(
            latest_observation(sdmx(json!({ "3": ["n/a"] }))),
            Err(ExchangeRateError::NonNumeric { .. })
        ));
    }

    #[test]
    fn test_wrong_layout_is_absent_not_fault() {
        assert_eq!(parse_exchange_rate(json!({ "error": "not found" })), None);
        assert_eq!(parse_exchange_rate(json!([1, 2, 3])), None);
    }

    #[test]
    fn test_window_is_seven_days_ending_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        let (start, end) = exchange_rate_window(today);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 27).expect("valid date"));
        assert_eq!(end, today);
    }

    #[test]
    fn test_url_substitutes_dates() {
        let fetcher = HttpFetcher::new(std::time::Duration::from_secs(1)).expect("client should build");
        let client = NorgesBankClient::new(fetcher, crate::constants::DEFAULT_EXCHANGE_RATE_URL);
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date");
        assert_eq!(
            client.url_for(today),
            "https://data.norges-bank.no/api/data/EXR/B.EUR.NOK.SP?format=sdmx-json&startPeriod=2024-01-03&endPeriod=2024-01-10&locale=no"
        );
    }
}
