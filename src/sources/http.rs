//! # HTTP Fetch Helper
//!
//! A single GET with a timeout, returning parsed JSON on 200 and `None` otherwise.
//! Failures are logged here and never propagate: callers treat absence as a
//! normal outcome.

use anyhow::{Context, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Shared HTTP client for all upstream requests
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built (TLS setup).
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("electricity-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    /// GET `url` and parse the body as JSON
    ///
    /// Returns `None` on any non-200 status, transport error, timeout, or
    /// unparsable body.
    pub async fn fetch_json(&self, url: &str, headers: Option<HeaderMap>) -> Option<Value> {
        let mut request = self.client.get(url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Bad status {} for {}", status.as_u16(), url);
            return None;
        }

        match response.json::<Value>().await {
            Ok(body) => {
                debug!("Fetched {}", url);
                Some(body)
            }
            Err(e) => {
                error!("Request failed: {}", e);
                None
            }
        }
    }
}
