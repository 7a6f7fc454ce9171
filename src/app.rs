//! Application state management
//!
//! This module contains the main application state: the current view, the
//! amount/currency selection, the rate snapshot, and the wiring between
//! keyboard input, the refresh scheduler, the connectivity monitor, and the
//! persisted preference record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cache::RateCache;
use crate::cli::StartupConfig;
use crate::connectivity::{ConnectivityMonitor, Transition};
use crate::convert::{self, Conversion};
use crate::data::catalog::{default_from, default_to};
use crate::data::{all_currencies, get_currency_by_code, Currency, RateClient, RateError, RateSnapshot};
use crate::prefs::{Preference, PreferenceStore, PreferenceSync};
use crate::refresh::{RefreshScheduler, RefreshTrigger};
use crate::storage::Storage;

/// Maximum length of the amount input, in characters
const AMOUNT_MAX_LEN: usize = 12;

/// The currently displayed view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Main conversion screen
    Converter,
    /// Modal picker choosing the source currency
    PickerFrom,
    /// Modal picker choosing the target currency
    PickerTo,
}

/// Transient state of the currency picker modal
#[derive(Debug, Default)]
pub struct PickerState {
    /// Incremental search text
    pub search: String,
    /// Index into the filtered list
    pub highlighted: usize,
}

impl PickerState {
    /// Catalog entries matching the search, by code or name
    pub fn filtered(&self) -> Vec<&'static Currency> {
        let needle = self.search.to_lowercase();
        all_currencies()
            .iter()
            .filter(|c| {
                c.code.to_lowercase().contains(&needle)
                    || c.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn reset(&mut self) {
        self.search.clear();
        self.highlighted = 0;
    }
}

/// Main application struct managing state and data
pub struct App<S: Storage> {
    /// Current view
    pub view: View,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Raw amount input text
    pub amount_text: String,
    /// Source currency
    pub from: &'static Currency,
    /// Target currency
    pub to: &'static Currency,
    /// Current rate snapshot; empty until populated from cache or a fetch
    pub snapshot: RateSnapshot,
    /// Fetch time of the displayed snapshot, if any data is held
    pub last_updated: Option<DateTime<Utc>>,
    /// User-visible error line, if the last fetch failed
    pub error: Option<String>,
    /// Flag to show the help overlay
    pub show_help: bool,
    /// Currency picker modal state
    pub picker: PickerState,
    /// Online/offline tracking
    pub connectivity: ConnectivityMonitor,
    /// Refresh state machine
    pub scheduler: RefreshScheduler,
    /// Rate API client, cloned into fetch tasks
    pub rate_client: RateClient,
    /// A refresh request waiting for the next tick
    pending_refresh: Option<RefreshTrigger>,
    cache: RateCache<S>,
    pref_store: PreferenceStore<S>,
    pref_sync: PreferenceSync,
}

impl<S: Storage> App<S> {
    /// Creates the application over the given storage backends
    ///
    /// Loads and applies the persisted preference (CLI overrides win), then
    /// consults the rate cache: a fresh snapshot is used in place of a
    /// startup fetch, while a stale or absent one leaves the snapshot empty
    /// and queues an immediate fetch.
    pub fn with_storage(
        cache_storage: S,
        pref_storage: S,
        config: StartupConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let pref_store = PreferenceStore::new(pref_storage);
        let mut pref_sync = PreferenceSync::new();

        let loaded = pref_store.load();
        pref_sync.should_apply(&loaded);
        pref_sync.mark_persisted(&loaded);

        let mut from = get_currency_by_code(&loaded.from_code).unwrap_or_else(default_from);
        let mut to = get_currency_by_code(&loaded.to_code).unwrap_or_else(default_to);
        let mut amount_text = loaded.amount_text;

        // CLI overrides count as user edits; the write-back pass persists
        // them like any other change.
        if let Some(c) = config.from {
            from = c;
        }
        if let Some(c) = config.to {
            to = c;
        }
        if let Some(a) = config.amount {
            amount_text = a;
        }

        let cache = RateCache::new(cache_storage);
        let (snapshot, last_updated, pending_refresh) = match cache.load() {
            Some(cached) if cache.is_fresh(&cached, now) => {
                let fetched_at = cached.fetched_at;
                (cached, Some(fetched_at), None)
            }
            _ => (
                RateSnapshot::new(HashMap::new(), now),
                None,
                Some(RefreshTrigger::Startup),
            ),
        };

        Self {
            view: View::Converter,
            should_quit: false,
            amount_text,
            from,
            to,
            snapshot,
            last_updated,
            error: None,
            show_help: false,
            picker: PickerState::default(),
            connectivity: ConnectivityMonitor::new(),
            scheduler: RefreshScheduler::new(now),
            rate_client: RateClient::new(),
            pending_refresh,
            cache,
            pref_store,
            pref_sync,
        }
    }

    /// The preference record matching current UI state
    pub fn current_preference(&self) -> Preference {
        Preference {
            from_code: self.from.code.to_string(),
            to_code: self.to.code.to_string(),
            amount_text: self.amount_text.clone(),
        }
    }

    /// Evaluates the conversion for the current selection
    pub fn conversion(&self) -> Conversion {
        convert::evaluate(&self.snapshot, self.from.code, self.to.code, &self.amount_text)
    }

    /// True when the display should carry the "cached rates" label
    ///
    /// Offline with data held: the snapshot stays visible, annotated as
    /// cached; nothing is cleared on the offline transition.
    pub fn showing_cached(&self) -> bool {
        !self.connectivity.is_online() && self.last_updated.is_some()
    }

    /// Per-iteration housekeeping; returns a trigger when a fetch must start
    ///
    /// Runs the edge-triggered preference write-back, then arbitrates refresh
    /// requests against the scheduler. Manual and periodic requests double as
    /// connectivity probes while offline, so the 5-minute schedule keeps
    /// attempting after a failed fetch; the offline belief only affects the
    /// display and the catch-up edge.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<RefreshTrigger> {
        let current = self.current_preference();
        self.pref_sync.persist_if_changed(&self.pref_store, &current);

        let trigger = match self.pending_refresh.take() {
            Some(t) => t,
            None if self.scheduler.periodic_due(now) => RefreshTrigger::Periodic,
            None => return None,
        };

        let online = self.connectivity.is_online()
            || matches!(
                trigger,
                RefreshTrigger::Manual | RefreshTrigger::Periodic
            );
        if self.scheduler.try_begin(trigger, online, now) {
            Some(trigger)
        } else {
            None
        }
    }

    /// Applies a settled fetch outcome
    ///
    /// Success replaces and persists the snapshot wholesale; failure leaves
    /// the snapshot untouched and surfaces an error line. Exactly one
    /// handling pass runs per completed fetch, even if a stray settle
    /// arrives.
    pub fn apply_settle(&mut self, result: Result<RateSnapshot, RateError>, now: DateTime<Utc>) {
        if !self.scheduler.settle(now) {
            return;
        }
        match result {
            Ok(snapshot) => {
                // Data just arrived, so the online edge needs no catch-up
                // refresh of its own.
                let _ = self.connectivity.record_success();
                if !snapshot.is_empty() {
                    self.cache.store(&snapshot);
                    self.last_updated = Some(snapshot.fetched_at);
                    self.snapshot = snapshot;
                }
                self.error = None;
            }
            Err(err) => {
                if err.is_transport() {
                    let _ = self.connectivity.record_failure();
                }
                self.error = Some("Failed to fetch exchange rates".to_string());
            }
        }
    }

    /// Feeds an externally observed connectivity state into the monitor
    ///
    /// The offline-to-online edge queues exactly one catch-up refresh; the
    /// reverse edge only changes the display.
    pub fn observe_connectivity(&mut self, online: bool) {
        if self.connectivity.observe(online) == Some(Transition::Online) {
            self.pending_refresh = Some(RefreshTrigger::ConnectivityRegained);
        }
    }

    /// Re-reads the persisted preference and applies it if it changed
    ///
    /// The load-apply direction of the reconciliation loop; fires only when
    /// the persisted value differs from the last applied one.
    pub fn reload_preferences(&mut self) {
        let persisted = self.pref_store.load();
        if !self.pref_sync.should_apply(&persisted) {
            return;
        }
        self.from = get_currency_by_code(&persisted.from_code).unwrap_or_else(default_from);
        self.to = get_currency_by_code(&persisted.to_code).unwrap_or_else(default_to);
        self.amount_text = persisted.amount_text;
        self.pref_sync.mark_persisted(&self.current_preference());
    }

    /// Swaps the source and target currencies
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q` or `Esc` (in Converter): quit
    /// - digits, `.`/`,`, Backspace: edit the amount
    /// - `f`/`t`: open the from/to currency picker
    /// - `s`: swap currencies
    /// - `r`: manual refresh
    /// - `?`: help overlay
    /// - Picker: type to search, Up/Down to move, Enter to select, Esc to close
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.view {
            View::Converter => self.handle_converter_key(key_event),
            View::PickerFrom | View::PickerTo => self.handle_picker_key(key_event),
        }
    }

    fn handle_converter_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('f') => {
                self.picker.reset();
                self.view = View::PickerFrom;
            }
            KeyCode::Char('t') => {
                self.picker.reset();
                self.view = View::PickerTo;
            }
            KeyCode::Char('s') => {
                self.swap();
            }
            KeyCode::Char('r') => {
                self.pending_refresh = Some(RefreshTrigger::Manual);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Backspace => {
                self.amount_text.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                if self.amount_text.len() < AMOUNT_MAX_LEN {
                    self.amount_text.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.view = View::Converter;
            }
            KeyCode::Down => {
                let count = self.picker.filtered().len();
                if count > 0 && self.picker.highlighted < count - 1 {
                    self.picker.highlighted += 1;
                }
            }
            KeyCode::Up => {
                self.picker.highlighted = self.picker.highlighted.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(&currency) = self.picker.filtered().get(self.picker.highlighted) {
                    match self.view {
                        View::PickerFrom => self.from = currency,
                        View::PickerTo => self.to = currency,
                        View::Converter => {}
                    }
                    self.view = View::Converter;
                }
            }
            KeyCode::Backspace => {
                self.picker.search.pop();
                self.picker.highlighted = 0;
            }
            KeyCode::Char(c) if c.is_alphanumeric() || c == ' ' => {
                self.picker.search.push(c);
                self.picker.highlighted = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::Preference;
    use crate::storage::{MemoryStorage, Storage as _};
    use chrono::{Duration, TimeZone};
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
    }

    fn fresh_app() -> App<MemoryStorage> {
        App::with_storage(
            MemoryStorage::new(),
            MemoryStorage::new(),
            StartupConfig::default(),
            start_time(),
        )
    }

    fn snapshot_json(fetched_at: DateTime<Utc>) -> String {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), 0.9);
        serde_json::to_string(&RateSnapshot::new(rates, fetched_at)).unwrap()
    }

    fn usd_eur_snapshot(fetched_at: DateTime<Utc>) -> RateSnapshot {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), 0.9);
        RateSnapshot::new(rates, fetched_at)
    }

    // ------------------------------------------------------------------
    // Startup
    // ------------------------------------------------------------------

    #[test]
    fn test_initial_state_defaults() {
        let app = fresh_app();
        assert_eq!(app.view, View::Converter);
        assert_eq!(app.from.code, "USD");
        assert_eq!(app.to.code, "EUR");
        assert_eq!(app.amount_text, "1");
        assert!(app.snapshot.is_empty());
        assert!(app.last_updated.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_startup_with_fresh_cache_skips_fetch() {
        let now = start_time();
        let cache_storage = MemoryStorage::new();
        cache_storage
            .set("exchange_rates", &snapshot_json(now - Duration::minutes(1)))
            .unwrap();

        let mut app = App::with_storage(
            cache_storage,
            MemoryStorage::new(),
            StartupConfig::default(),
            now,
        );

        assert!(!app.snapshot.is_empty(), "fresh snapshot is used");
        assert_eq!(app.last_updated, Some(now - Duration::minutes(1)));
        assert!(app.tick(now).is_none(), "no startup fetch with a fresh cache");
    }

    #[test]
    fn test_startup_with_stale_cache_triggers_fetch() {
        let now = start_time();
        let cache_storage = MemoryStorage::new();
        cache_storage
            .set("exchange_rates", &snapshot_json(now - Duration::minutes(10)))
            .unwrap();

        let mut app = App::with_storage(
            cache_storage,
            MemoryStorage::new(),
            StartupConfig::default(),
            now,
        );

        assert!(app.snapshot.is_empty(), "stale snapshot stays unloaded");
        assert_eq!(app.tick(now), Some(RefreshTrigger::Startup));
    }

    #[test]
    fn test_startup_with_empty_cache_triggers_fetch() {
        let mut app = fresh_app();
        assert_eq!(app.tick(start_time()), Some(RefreshTrigger::Startup));
    }

    #[test]
    fn test_startup_applies_persisted_preference() {
        let pref_storage = MemoryStorage::new();
        let pref = Preference {
            from_code: "GBP".to_string(),
            to_code: "JPY".to_string(),
            amount_text: "42".to_string(),
        };
        pref_storage
            .set("preferences", &serde_json::to_string(&pref).unwrap())
            .unwrap();

        let app = App::with_storage(
            MemoryStorage::new(),
            pref_storage,
            StartupConfig::default(),
            start_time(),
        );

        assert_eq!(app.from.code, "GBP");
        assert_eq!(app.to.code, "JPY");
        assert_eq!(app.amount_text, "42");
    }

    #[test]
    fn test_startup_unknown_persisted_code_falls_back() {
        let pref_storage = MemoryStorage::new();
        pref_storage
            .set(
                "preferences",
                r#"{"from":"ZZZ","to":"CHF","amount":"5"}"#,
            )
            .unwrap();

        let app = App::with_storage(
            MemoryStorage::new(),
            pref_storage,
            StartupConfig::default(),
            start_time(),
        );

        assert_eq!(app.from.code, "USD");
        assert_eq!(app.to.code, "CHF");
    }

    #[test]
    fn test_cli_overrides_win_and_get_persisted() {
        let now = start_time();
        let config = StartupConfig {
            from: get_currency_by_code("CAD"),
            to: get_currency_by_code("AUD"),
            amount: Some("250".to_string()),
        };
        let mut app = App::with_storage(MemoryStorage::new(), MemoryStorage::new(), config, now);

        assert_eq!(app.from.code, "CAD");
        assert_eq!(app.to.code, "AUD");
        assert_eq!(app.amount_text, "250");

        // The first tick writes the override back like a user edit
        app.tick(now);
        app.reload_preferences();
        assert_eq!(app.from.code, "CAD", "reload does not bounce the state");
    }

    // ------------------------------------------------------------------
    // Refresh orchestration
    // ------------------------------------------------------------------

    #[test]
    fn test_manual_refresh_requested_by_key() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now); // consume the startup fetch
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.tick(now), Some(RefreshTrigger::Manual));
    }

    #[test]
    fn test_trigger_while_refreshing_is_noop() {
        let now = start_time();
        let mut app = fresh_app();
        assert_eq!(app.tick(now), Some(RefreshTrigger::Startup));

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.tick(now).is_none(), "manual during in-flight fetch is dropped");
        assert!(app.scheduler.is_refreshing());
    }

    #[test]
    fn test_periodic_tick_fires_after_interval() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        assert!(app.tick(now + Duration::minutes(4)).is_none());
        assert_eq!(
            app.tick(now + Duration::minutes(5)),
            Some(RefreshTrigger::Periodic)
        );
    }

    #[test]
    fn test_periodic_probes_while_offline() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);
        app.observe_connectivity(false);

        assert_eq!(
            app.tick(now + Duration::minutes(6)),
            Some(RefreshTrigger::Periodic),
            "the periodic schedule keeps attempting while believed offline"
        );
    }

    #[tokio::test]
    async fn test_periodic_schedule_survives_transport_failure() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now); // startup fetch in flight

        // A real connection-refused error, the kind that marks us offline
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/latest")
            .send()
            .await
            .unwrap_err();
        app.apply_settle(Err(RateError::from(err)), now);
        assert!(!app.connectivity.is_online());

        assert_eq!(
            app.tick(now + Duration::minutes(6)),
            Some(RefreshTrigger::Periodic),
            "one transport failure must not suspend the periodic schedule"
        );

        // A succeeding probe brings the monitor back online
        app.apply_settle(Ok(usd_eur_snapshot(now + Duration::minutes(6))), now + Duration::minutes(6));
        assert!(app.connectivity.is_online());
    }

    #[test]
    fn test_manual_refresh_probes_while_offline() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);
        app.observe_connectivity(false);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.tick(now), Some(RefreshTrigger::Manual));
    }

    #[test]
    fn test_connectivity_regained_queues_one_catchup() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        app.observe_connectivity(false);
        app.observe_connectivity(true);
        assert_eq!(
            app.tick(now),
            Some(RefreshTrigger::ConnectivityRegained)
        );

        app.apply_settle(Ok(usd_eur_snapshot(now)), now);
        assert!(app.tick(now).is_none(), "exactly one catch-up per edge");
    }

    #[test]
    fn test_settle_success_stores_snapshot() {
        let now = start_time();
        let cache_storage = MemoryStorage::new();
        let mut app = App::with_storage(
            cache_storage,
            MemoryStorage::new(),
            StartupConfig::default(),
            now,
        );
        app.tick(now);

        let snapshot = usd_eur_snapshot(now);
        app.apply_settle(Ok(snapshot.clone()), now);

        assert_eq!(app.snapshot, snapshot);
        assert_eq!(app.last_updated, Some(now));
        assert!(app.error.is_none());
        assert!(!app.scheduler.is_refreshing());
    }

    #[test]
    fn test_settle_failure_keeps_snapshot_and_sets_error() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        app.handle_key(key(KeyCode::Char('r')));
        app.tick(now);
        let err: RateError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        app.apply_settle(Err(err), now);

        assert!(!app.snapshot.is_empty(), "failed fetch leaves the snapshot alone");
        assert!(app.error.is_some());
    }

    #[test]
    fn test_stray_settle_is_ignored() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        // No fetch in flight: a second settle must not run handling again
        let replacement = RateSnapshot::new(HashMap::new(), now);
        app.apply_settle(Ok(replacement), now);
        assert!(!app.snapshot.is_empty());
    }

    #[test]
    fn test_offline_keeps_cached_display() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now - Duration::minutes(2))), now);

        app.observe_connectivity(false);

        assert!(!app.snapshot.is_empty(), "offline clears nothing");
        assert!(app.showing_cached(), "data is labelled as cached while offline");
    }

    // ------------------------------------------------------------------
    // Preference reconciliation
    // ------------------------------------------------------------------

    #[test]
    fn test_tick_persists_each_genuine_change_once() {
        let now = start_time();
        let pref_storage = MemoryStorage::new();
        let mut app = App::with_storage(
            MemoryStorage::new(),
            pref_storage,
            StartupConfig::default(),
            now,
        );
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);

        // Settled state: repeated ticks write nothing
        for _ in 0..3 {
            app.tick(now);
        }

        app.handle_key(key(KeyCode::Char('0')));
        app.tick(now);
        assert_eq!(app.current_preference().amount_text, "10");

        // Stable again: reloading applies nothing new
        app.reload_preferences();
        assert_eq!(app.amount_text, "10");
    }

    #[test]
    fn test_swap_swaps_and_persists() {
        let now = start_time();
        let mut app = fresh_app();

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.from.code, "EUR");
        assert_eq!(app.to.code, "USD");

        app.tick(now);
        app.reload_preferences();
        assert_eq!(app.from.code, "EUR", "swap survives a reload pass");
    }

    // ------------------------------------------------------------------
    // Conversion display states
    // ------------------------------------------------------------------

    #[test]
    fn test_conversion_with_rates() {
        let now = start_time();
        let mut app = fresh_app();
        app.tick(now);
        app.apply_settle(Ok(usd_eur_snapshot(now)), now);
        app.amount_text = "10".to_string();

        let conversion = app.conversion();
        assert!((conversion.rate.unwrap() - 0.9).abs() < 1e-12);
        assert!((conversion.converted.unwrap() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_empty_snapshot_is_rate_unavailable() {
        let app = fresh_app();
        let conversion = app.conversion();
        assert!(conversion.rate.is_none());
        assert!(conversion.converted.is_none());
    }

    // ------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------

    #[test]
    fn test_q_and_esc_quit_from_converter() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_amount_editing() {
        let mut app = fresh_app();
        app.amount_text.clear();

        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Char(',')));
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.amount_text, "12,5");

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.amount_text, "12,");

        // Letters are not amount input
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.amount_text, "12,");
    }

    #[test]
    fn test_amount_length_is_capped() {
        let mut app = fresh_app();
        app.amount_text.clear();
        for _ in 0..20 {
            app.handle_key(key(KeyCode::Char('9')));
        }
        assert_eq!(app.amount_text.len(), AMOUNT_MAX_LEN);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);

        // 'q' closes help instead of quitting
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    // ------------------------------------------------------------------
    // Picker
    // ------------------------------------------------------------------

    #[test]
    fn test_picker_open_select_and_close() {
        let mut app = fresh_app();

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.view, View::PickerTo);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.view, View::Converter);
        assert_eq!(app.to.code, "GBP", "third catalog entry selected");
    }

    #[test]
    fn test_picker_search_filters_by_code_and_name() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('f')));

        for c in "yen".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let filtered = app.picker.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].code, "JPY");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.from.code, "JPY");
    }

    #[test]
    fn test_picker_search_no_match_enter_is_noop() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('f')));
        for c in "zzz".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert!(app.picker.filtered().is_empty());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::PickerFrom, "nothing to select");
        assert_eq!(app.from.code, "USD");
    }

    #[test]
    fn test_picker_esc_closes_without_selecting() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('t')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.view, View::Converter);
        assert_eq!(app.to.code, "EUR");
    }

    #[test]
    fn test_picker_highlight_clamps_at_ends() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('f')));

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.picker.highlighted, 0);

        let count = app.picker.filtered().len();
        for _ in 0..count + 5 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.picker.highlighted, count - 1);
    }

    #[test]
    fn test_picker_backspace_resets_highlight() {
        let mut app = fresh_app();
        app.handle_key(key(KeyCode::Char('f')));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('u')));
        assert_eq!(app.picker.highlighted, 0);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.picker.highlighted, 0);
    }
}
