//! Converter screen rendering
//!
//! Renders the main conversion view: the amount input, the selected currency
//! pair, the converted result with forward and inverse rates, and status
//! lines for connectivity, data freshness, and errors.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::convert::AmountError;
use crate::data::Currency;
use crate::format::{format_currency, format_rate};
use crate::storage::Storage;

/// Renders the converter screen
pub fn render<S: Storage>(frame: &mut Frame, app: &App<S>, now: DateTime<Utc>) {
    let area = frame.area();

    // Header, status line, input/result panels, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(1), // Connectivity / freshness status
            Constraint::Length(5), // Amount + pair input
            Constraint::Min(5),    // Result panel
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_status(frame, app, chunks[1], now);
    render_input(frame, app, chunks[2]);
    render_result(frame, app, chunks[3]);
    render_help(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let now = Local::now();
    let time_str = now.format("%a %b %d, %H:%M").to_string();

    let width = area.width as usize;
    let separator = "─".repeat(width.saturating_sub(2));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "CAMBIO",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Currency Converter", Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(time_str, Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Connectivity indicator plus data freshness in one line
fn render_status<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect, now: DateTime<Utc>) {
    let mut spans = Vec::new();

    if app.connectivity.is_online() {
        spans.push(Span::styled("● Online", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled("● Offline", Style::default().fg(Color::Red)));
    }

    if let Some(last_updated) = app.last_updated {
        let elapsed = now - last_updated;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Rates: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Rates: {}m ago", mins_ago)
        } else {
            format!(" │ Rates: {}h ago", elapsed.num_hours())
        };
        spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    if app.showing_cached() {
        spans.push(Span::styled(
            " │ Using cached rates",
            Style::default().fg(Color::Yellow),
        ));
    }

    if app.scheduler.is_busy(now) {
        spans.push(Span::styled(
            " │ Refreshing…",
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn currency_label(currency: &Currency) -> String {
    format!("{} — {}", currency.code, currency.name)
}

fn render_input<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let amount_display = if app.amount_text.is_empty() {
        Span::styled("0", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            app.amount_text.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };
    let amount = Paragraph::new(Line::from(amount_display)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Amount ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(amount, row[0]);

    let from = Paragraph::new(Line::from(Span::styled(
        currency_label(app.from),
        Style::default().fg(Color::White),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" From (f) ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(from, row[1]);

    let to = Paragraph::new(Line::from(Span::styled(
        currency_label(app.to),
        Style::default().fg(Color::White),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" To (t) ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(to, row[2]);
}

fn render_result<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let conversion = app.conversion();
    let mut lines = Vec::new();

    match (&conversion.amount, conversion.converted) {
        (Ok(amount), Some(converted)) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format_currency(*amount, app.from),
                    Style::default().fg(Color::White),
                ),
                Span::styled(" = ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_currency(converted, app.to),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        (Err(AmountError::Empty), _) => {
            lines.push(Line::from(Span::styled(
                "Enter an amount to convert",
                Style::default().fg(Color::DarkGray),
            )));
        }
        (Err(AmountError::Invalid(_)), _) => {
            lines.push(Line::from(Span::styled(
                "Invalid amount",
                Style::default().fg(Color::Red),
            )));
        }
        (Ok(_), None) => {
            lines.push(Line::from(Span::styled(
                "Exchange rate not available",
                Style::default().fg(Color::Yellow),
            )));
        }
    }

    lines.push(Line::from(""));

    match (conversion.rate, conversion.inverse_rate) {
        (Some(rate), Some(inverse)) => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("1 {} = ", app.from.code),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{} {}", format_rate(rate), app.to.code),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("1 {} = ", app.to.code),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("{} {}", format_rate(inverse), app.from.code),
                    Style::default().fg(Color::Cyan),
                ),
            ]));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Rates unavailable for this pair",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(ref error) = app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Conversion ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(result, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help_spans = vec![
        Span::styled("0-9 . ,", Style::default().fg(Color::Yellow)),
        Span::raw(" Amount  "),
        Span::styled("f/t", Style::default().fg(Color::Yellow)),
        Span::raw(" Currencies  "),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(" Swap  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
