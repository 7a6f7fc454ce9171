//! Core data models for the currency converter
//!
//! This module contains the data types used throughout the application
//! for representing currencies and fetched exchange-rate snapshots.

pub mod catalog;
pub mod rates;

pub use catalog::{all_currencies, get_currency_by_code};
pub use rates::{RateClient, RateError};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A currency in the static catalog
///
/// Uses `&'static str` for string fields to allow static initialization
/// of the CURRENCIES array. Use `get_currency_by_code` to look up a currency
/// from a deserialized code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// ISO 4217 currency code, e.g. "USD"
    pub code: &'static str,
    /// Human-readable currency name
    pub name: &'static str,
    /// Display symbol, e.g. "$"
    pub symbol: &'static str,
}

/// One fetched exchange-rate table plus its fetch timestamp
///
/// All rates are expressed relative to the remote source's implicit base
/// currency. A snapshot is replaced wholesale on every successful fetch and
/// never partially merged with an earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Currency code to rate-relative-to-base
    pub rates: HashMap<String, f64>,
    /// When the rates were fetched (remote report time when available)
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Creates a snapshot from a rate table and fetch time
    pub fn new(rates: HashMap<String, f64>, fetched_at: DateTime<Utc>) -> Self {
        Self { rates, fetched_at }
    }

    /// True when the snapshot holds no rates at all
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
