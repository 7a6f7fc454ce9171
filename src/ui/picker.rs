//! Currency picker modal rendering
//!
//! Renders a centered overlay listing the currency catalog, filtered by the
//! current search text, with the highlighted row marked for selection.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, View};
use crate::storage::Storage;
use crate::ui::help_overlay::centered_rect;

/// Renders the currency picker overlay on top of the converter
pub fn render<S: Storage>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();

    let overlay_width = 44;
    let overlay_height = 16;
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    frame.render_widget(Clear, overlay_area);

    let title = match app.view {
        View::PickerFrom => " Convert From ",
        View::PickerTo => " Convert To ",
        View::Converter => " Currency ",
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Gray)),
            Span::styled(
                app.picker.search.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
    ];

    let matches = app.picker.filtered();
    if matches.is_empty() {
        lines.push(Line::from(Span::styled(
            "No matching currencies",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (i, currency) in matches.iter().enumerate() {
            let marker = if i == app.picker.highlighted {
                "▶ "
            } else {
                "  "
            };
            let style = if i == app.picker.highlighted {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<5}", currency.code), style),
                Span::styled(
                    format!("{} ", currency.symbol),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(currency.name, Style::default().fg(Color::Gray)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ move · Enter select · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}
