//! UI rendering module
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod converter;
pub mod help_overlay;
pub mod picker;

pub use converter::render as render_converter;
pub use help_overlay::render as render_help_overlay;
pub use picker::render as render_picker;
