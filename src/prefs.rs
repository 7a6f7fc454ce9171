//! Persisted user preferences and their reconciliation with UI state
//!
//! The preference record (from/to currency, raw amount text) lives in two
//! places at once: the storage backend and the in-memory application state.
//! Synchronizing them naively in both directions oscillates forever, with
//! each "apply persisted" pass triggering a "persist current" pass and back.
//! `PreferenceSync` breaks the loop with edge-triggered reconciliation: it
//! remembers the last applied and last persisted values and fires either
//! direction only on a detected delta across all three fields.

use serde::{Deserialize, Serialize};

use crate::data::catalog::{default_from, default_to};
use crate::data::get_currency_by_code;
use crate::storage::Storage;

/// Storage key for the preference record
const PREFS_KEY: &str = "preferences";

/// The user's persisted selection
///
/// `amount_text` is the raw entered text, not a parsed number, so partial or
/// invalid input survives a restart exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    /// Source currency code
    #[serde(rename = "from")]
    pub from_code: String,
    /// Target currency code
    #[serde(rename = "to")]
    pub to_code: String,
    /// Raw amount input text
    #[serde(rename = "amount")]
    pub amount_text: String,
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            from_code: default_from().code.to_string(),
            to_code: default_to().code.to_string(),
            amount_text: "1".to_string(),
        }
    }
}

impl Preference {
    /// Replaces currency codes missing from the catalog with the defaults
    ///
    /// Resolution is per field: an unknown `from` falls back to the first
    /// catalog entry, an unknown `to` to the second, and the amount text is
    /// kept as-is.
    pub fn resolve_against_catalog(mut self) -> Self {
        if get_currency_by_code(&self.from_code).is_none() {
            self.from_code = default_from().code.to_string();
        }
        if get_currency_by_code(&self.to_code).is_none() {
            self.to_code = default_to().code.to_string();
        }
        self
    }
}

/// Store for the persisted preference record
#[derive(Debug)]
pub struct PreferenceStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    /// Creates a PreferenceStore over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads the persisted preference, falling back to defaults
    ///
    /// A missing or malformed entry yields the default preference; unknown
    /// currency codes are resolved against the catalog.
    pub fn load(&self) -> Preference {
        self.storage
            .get(PREFS_KEY)
            .and_then(|text| serde_json::from_str::<Preference>(&text).ok())
            .unwrap_or_default()
            .resolve_against_catalog()
    }

    /// Persists the preference synchronously
    ///
    /// Write failures are swallowed, persistence is advisory.
    pub fn save(&self, pref: &Preference) {
        if let Ok(json) = serde_json::to_string(pref) {
            let _ = self.storage.set(PREFS_KEY, &json);
        }
    }
}

/// Edge-triggered reconciliation between persisted and in-memory preference
///
/// Tracks the last value applied to UI state and the last value persisted,
/// separately from the current UI state itself. Each direction fires only
/// when its side actually changed, so a settled state produces no further
/// writes or applies.
#[derive(Debug, Default)]
pub struct PreferenceSync {
    last_applied: Option<Preference>,
    last_persisted: Option<Preference>,
}

impl PreferenceSync {
    /// Creates a sync tracker with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether a persisted value must be applied to UI state
    ///
    /// Returns `true` exactly when `persisted` differs from the last applied
    /// value, and records it as applied. The initial load always applies.
    pub fn should_apply(&mut self, persisted: &Preference) -> bool {
        if self.last_applied.as_ref() == Some(persisted) {
            return false;
        }
        self.last_applied = Some(persisted.clone());
        true
    }

    /// Writes `current` back to the store iff it changed since the last write
    ///
    /// Returns `true` when a write actually happened. A value that was just
    /// applied from storage counts as already persisted, so applying never
    /// triggers an echo write.
    pub fn persist_if_changed<S: Storage>(
        &mut self,
        store: &PreferenceStore<S>,
        current: &Preference,
    ) -> bool {
        if self.last_persisted.as_ref() == Some(current) {
            return false;
        }
        store.save(current);
        self.last_persisted = Some(current.clone());
        // What we just wrote is also the value the UI holds; treat it as
        // applied so it does not bounce back on the next load pass.
        self.last_applied = Some(current.clone());
        true
    }

    /// Marks a value as already persisted without writing
    ///
    /// Used right after the initial load-and-apply, when storage and UI state
    /// already agree.
    pub fn mark_persisted(&mut self, pref: &Preference) {
        self.last_persisted = Some(pref.clone());
    }
}
