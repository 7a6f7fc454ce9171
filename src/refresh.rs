//! Refresh scheduling
//!
//! Orchestrates periodic and manual rate refreshes over a two-state machine
//! (`Idle`/`Refreshing`). At most one fetch is ever in flight: triggers that
//! arrive while refreshing are no-ops. The scheduler itself is synchronous
//! and takes explicit timestamps, so tests drive it with a virtual clock; the
//! async side is a spawned fetch task reporting back over a tokio channel.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::mpsc;

use crate::data::{RateClient, RateError, RateSnapshot};

/// Seconds between automatic refreshes
const REFRESH_INTERVAL_SECS: i64 = 5 * 60;

/// Minimum visible busy window for a manual refresh, in milliseconds
///
/// Keeps the refresh indicator from flickering when the network answers
/// instantly. Cosmetic only.
const MANUAL_BUSY_FLOOR_MS: i64 = 1000;

/// What asked for a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Startup found no fresh cached snapshot
    Startup,
    /// The periodic timer fired
    Periodic,
    /// The user pressed refresh
    Manual,
    /// Connectivity came back after an offline stretch
    ConnectivityRegained,
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No fetch in flight
    Idle,
    /// A fetch is in flight
    Refreshing,
}

/// Message sent from a background fetch task to the main loop
#[derive(Debug)]
pub enum RefreshMessage {
    /// The fetch settled, successfully or not
    Settled(Result<RateSnapshot, RateError>),
}

/// Drives when fetches start and tracks the in-flight flag
#[derive(Debug)]
pub struct RefreshScheduler {
    state: RefreshState,
    interval: Duration,
    next_due: DateTime<Utc>,
    busy_until: Option<DateTime<Utc>>,
}

impl RefreshScheduler {
    /// Creates a scheduler with the first periodic refresh due one interval
    /// from `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        let interval = Duration::seconds(REFRESH_INTERVAL_SECS);
        Self {
            state: RefreshState::Idle,
            interval,
            next_due: now + interval,
            busy_until: None,
        }
    }

    /// Current state
    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// True while a fetch is in flight
    pub fn is_refreshing(&self) -> bool {
        self.state == RefreshState::Refreshing
    }

    /// True while the UI should show a busy indicator
    ///
    /// Covers the in-flight window plus the manual-refresh floor.
    pub fn is_busy(&self, now: DateTime<Utc>) -> bool {
        if self.is_refreshing() {
            return true;
        }
        matches!(self.busy_until, Some(until) if now < until)
    }

    /// True when the periodic timer has elapsed
    pub fn periodic_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_due
    }

    /// Attempts to move to `Refreshing`
    ///
    /// Guarded by connectivity and the at-most-one-in-flight rule: returns
    /// `false` (a no-op) when offline or already refreshing. A manual trigger
    /// also arms the minimum busy window.
    pub fn try_begin(&mut self, trigger: RefreshTrigger, online: bool, now: DateTime<Utc>) -> bool {
        if !online || self.is_refreshing() {
            return false;
        }
        self.state = RefreshState::Refreshing;
        if trigger == RefreshTrigger::Manual {
            self.busy_until = Some(now + Duration::milliseconds(MANUAL_BUSY_FLOOR_MS));
        }
        true
    }

    /// Records that the in-flight fetch settled
    ///
    /// Returns `false` when no fetch was in flight, so a stray second settle
    /// cannot run its handling twice. The next periodic refresh is scheduled
    /// one interval out regardless of success or failure.
    pub fn settle(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_refreshing() {
            return false;
        }
        self.state = RefreshState::Idle;
        self.next_due = now + self.interval;
        true
    }
}

/// Spawns a background fetch and reports the outcome over `tx`
///
/// The task is detached; an in-flight fetch cannot be cancelled, and its
/// outcome is applied whenever it settles, even if connectivity was lost in
/// the meantime.
pub fn spawn_fetch(client: RateClient, tx: mpsc::Sender<RefreshMessage>) {
    tokio::spawn(async move {
        let result = client.fetch_rates().await;
        let _ = tx.send(RefreshMessage::Settled(result)).await;
    });
}
