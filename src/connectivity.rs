//! Online/offline tracking
//!
//! A terminal process has no ambient network-status signal, so connectivity
//! is inferred from fetch outcomes: a transport-level failure marks the
//! monitor offline, any success marks it online. The monitor reports each
//! transition exactly once so the offline-to-online edge can drive a single
//! catch-up refresh. Going offline never touches cached data; stale rates
//! stay visible, labelled as cached.

/// A reported connectivity change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Connectivity regained
    Online,
    /// Connectivity lost
    Offline,
}

/// Tracks the current connectivity belief and detects transitions
#[derive(Debug)]
pub struct ConnectivityMonitor {
    online: bool,
}

impl ConnectivityMonitor {
    /// Creates a monitor that assumes connectivity until proven otherwise
    pub fn new() -> Self {
        Self { online: true }
    }

    /// Current connectivity belief
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Records an observed state, returning the transition if one occurred
    ///
    /// Re-observing the current state yields `None`, so each edge is
    /// delivered at most once.
    pub fn observe(&mut self, online: bool) -> Option<Transition> {
        if online == self.online {
            return None;
        }
        self.online = online;
        Some(if online {
            Transition::Online
        } else {
            Transition::Offline
        })
    }

    /// Convenience: a fetch succeeded
    pub fn record_success(&mut self) -> Option<Transition> {
        self.observe(true)
    }

    /// Convenience: a fetch failed at the transport level
    pub fn record_failure(&mut self) -> Option<Transition> {
        self.observe(false)
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}
