//! Common UI components.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;
use crate::data::{status_color, StatusColor};

/// Render the header bar with the backend status and polled endpoint.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status_state();

    let (indicator, class) = match (&status.health, status.loading) {
        (_, true) | (None, _) => ("◌", StatusColor::Secondary),
        (Some(view), false) => ("●", status_color(&view.backend)),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", indicator), app.theme.status_style(class)),
        Span::styled("SYSTEM HEALTH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.endpoint().to_string()),
        Span::raw(" │ "),
        Span::styled(
            format!(
                "status every {} · load every {}",
                format_duration(app.config.status_interval),
                format_duration(app.config.load_interval)
            ),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows time since the last applied poll, the last fetch error, and controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "r:refresh e:export ?:help q:quit";

    let status = match (app.last_updated(), app.last_error()) {
        (Some(updated), Some(err)) => format!(
            " Updated {:.1}s ago | Error: {} | {}",
            updated.elapsed().as_secs_f64(),
            err,
            controls
        ),
        (Some(updated), None) => format!(
            " Updated {:.1}s ago | {}",
            updated.elapsed().as_secs_f64(),
            controls
        ),
        (None, _) => format!(" Loading... | {}", controls),
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from("  r         Poll now"),
        Line::from("  e         Export to JSON"),
        Line::from("  ?         Toggle help"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Chart markers",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("  ●", Style::default().fg(app.theme.danger)),
            Span::raw("         Fetch failed"),
        ]),
        Line::from(vec![
            Span::styled("  ●", Style::default().fg(app.theme.warning)),
            Span::raw("         No CPU reading"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 15u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
