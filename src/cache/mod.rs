//! Rate snapshot cache
//!
//! Persists the last-fetched exchange-rate snapshot through the storage port
//! and decides when a persisted snapshot is fresh enough to use in place of a
//! network fetch. Malformed persisted data is treated as a cache miss, never
//! surfaced as an error.

mod rates;

pub use rates::{rates_ttl, RateCache};
