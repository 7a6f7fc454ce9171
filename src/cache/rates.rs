//! Persisted rate-snapshot cache with a freshness check

use chrono::{DateTime, Duration, Utc};

use crate::data::RateSnapshot;
use crate::storage::Storage;

/// Storage key for the persisted snapshot
const RATES_KEY: &str = "exchange_rates";

/// Cache TTL in minutes
const RATES_TTL_MINUTES: i64 = 5;

/// How long a cached snapshot is trusted without a refetch
pub fn rates_ttl() -> Duration {
    Duration::minutes(RATES_TTL_MINUTES)
}

/// Cache for the last-fetched rate snapshot
///
/// The snapshot is owned exclusively by this cache: it is replaced wholesale
/// on each successful fetch and never partially merged. Freshness is
/// all-or-nothing at snapshot granularity.
#[derive(Debug)]
pub struct RateCache<S: Storage> {
    storage: S,
}

impl<S: Storage> RateCache<S> {
    /// Creates a RateCache over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads the persisted snapshot
    ///
    /// Returns `None` when no entry exists or the entry fails to parse.
    pub fn load(&self) -> Option<RateSnapshot> {
        let text = self.storage.get(RATES_KEY)?;
        serde_json::from_str(&text).ok()
    }

    /// True iff the snapshot was fetched strictly less than the TTL ago
    ///
    /// A snapshot aged exactly at the TTL boundary is stale.
    pub fn is_fresh(&self, snapshot: &RateSnapshot, now: DateTime<Utc>) -> bool {
        now - snapshot.fetched_at < rates_ttl()
    }

    /// Persists the snapshot, overwriting any prior value
    ///
    /// Empty rate tables are never stored; a snapshot with no entries leaves
    /// the persisted state untouched. Write failures are swallowed, the cache
    /// is advisory.
    pub fn store(&self, snapshot: &RateSnapshot) {
        if snapshot.is_empty() {
            return;
        }
        if let Ok(json) = serde_json::to_string(snapshot) {
            let _ = self.storage.set(RATES_KEY, &json);
        }
    }
}
