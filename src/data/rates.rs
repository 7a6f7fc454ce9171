//! Exchange-rate API client
//!
//! Fetches the latest rate table from fxratesapi and parses it into a
//! `RateSnapshot`. One request, no internal retries; scheduling and retry
//! policy live in the refresh layer. Every transport or decoding failure
//! collapses into a single `RateError` so callers see one "fetch failed"
//! outcome.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::RateSnapshot;

/// Endpoint returning the latest rates against a fixed base
const FXRATES_API_URL: &str = "https://api.fxratesapi.com/latest";

/// Errors that can occur when fetching exchange rates
#[derive(Debug, Error)]
pub enum RateError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl RateError {
    /// True when the failure happened at the transport level
    ///
    /// Transport failures feed the connectivity monitor; a decode failure on
    /// a delivered response says nothing about being offline.
    pub fn is_transport(&self) -> bool {
        matches!(self, RateError::RequestFailed(_))
    }
}

/// Wire format of the rate source
#[derive(Debug, Deserialize)]
struct RatesResponse {
    /// The base currency all rates are relative to
    #[allow(dead_code)]
    base: Option<String>,
    /// Currency code to rate
    rates: std::collections::HashMap<String, f64>,
    /// Timestamp the source reports for the rates, if any
    date: Option<String>,
}

/// Client for fetching exchange rates
#[derive(Debug, Clone)]
pub struct RateClient {
    client: Client,
    base_url: String,
}

impl Default for RateClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RateClient {
    /// Creates a RateClient against the production endpoint
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: FXRATES_API_URL.to_string(),
        }
    }

    /// Creates a RateClient against a custom endpoint (for testing)
    #[allow(dead_code)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the latest rate snapshot
    ///
    /// # Returns
    /// * `Ok(RateSnapshot)` - the parsed snapshot
    /// * `Err(RateError)` - if the request or parsing fails
    pub async fn fetch_rates(&self) -> Result<RateSnapshot, RateError> {
        let response = self.client.get(&self.base_url).send().await?;
        let text = response.text().await?;
        let parsed: RatesResponse = serde_json::from_str(&text)?;
        Ok(snapshot_from_response(parsed, Utc::now()))
    }
}

/// Builds a snapshot from a parsed response
///
/// The snapshot timestamp is the response's own `date` when present and
/// parseable, guarding against a missing or null field upstream by falling
/// back to the local clock.
fn snapshot_from_response(response: RatesResponse, now: DateTime<Utc>) -> RateSnapshot {
    let fetched_at = response
        .date
        .as_deref()
        .and_then(parse_report_time)
        .unwrap_or(now);
    RateSnapshot::new(response.rates, fetched_at)
}

/// Parses the source's report timestamp (RFC 3339)
fn parse_report_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
