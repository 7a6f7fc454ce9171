//! Cambio - Terminal currency converter
//!
//! A terminal UI application that converts amounts between currencies using
//! live exchange rates, with offline fallback to cached rates and persisted
//! preferences.

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use cambio::app::{App, View};
use cambio::cli::{Cli, StartupConfig};
use cambio::refresh::{spawn_fetch, RefreshMessage};
use cambio::storage::FileStorage;
use cambio::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current view
fn render_ui(frame: &mut ratatui::Frame, app: &App<FileStorage>) {
    let now = Utc::now();
    ui::render_converter(frame, app, now);

    match app.view {
        View::PickerFrom | View::PickerTo => {
            ui::render_picker(frame, app);
        }
        View::Converter => {}
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(2);
        }
    };

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Storage lands under the XDG data directory; fall back to a temp
    // directory when no home directory is available.
    let storage = FileStorage::new()
        .unwrap_or_else(|| FileStorage::with_dir(std::env::temp_dir().join("cambio")));
    let mut app = App::with_storage(storage.clone(), storage, config, Utc::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel carrying settled fetch outcomes back from background tasks
    let (tx, mut rx) = mpsc::channel::<RefreshMessage>(8);

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Apply any fetch outcome that settled since the last iteration
        while let Ok(RefreshMessage::Settled(result)) = rx.try_recv() {
            app.apply_settle(result, Utc::now());
        }

        // Housekeeping: preference write-back and refresh arbitration
        if app.tick(Utc::now()).is_some() {
            spawn_fetch(app.rate_client.clone(), tx.clone());
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
