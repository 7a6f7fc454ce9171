//! Cambio library
//!
//! Terminal currency converter: exchange rates fetched from fxratesapi.com,
//! cached on disk with a freshness window, converted through a pure engine,
//! with persisted currency and amount preferences. The modules are exposed
//! here so integration tests can drive them directly.

pub mod app;
pub mod cache;
pub mod cli;
pub mod connectivity;
pub mod convert;
pub mod data;
pub mod format;
pub mod prefs;
pub mod refresh;
pub mod storage;
pub mod ui;
