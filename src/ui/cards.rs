//! Status card rendering.
//!
//! One bordered card per status category, colored by [`status_color`].
//! Wide terminals get a single row of four; narrow ones a 2x2 grid.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::CARDS_HEIGHT;
use crate::app::App;
use crate::data::{status_color, StatusCategory, StatusColor};

/// Below this width the cards wrap into two rows.
const SINGLE_ROW_MIN_WIDTH: u16 = 96;

const CATEGORIES: [StatusCategory; 4] = [
    StatusCategory::Backend,
    StatusCategory::Cpu,
    StatusCategory::Db,
    StatusCategory::Version,
];

/// Height needed by the card area at the given terminal width.
pub fn required_height(width: u16) -> u16 {
    if width >= SINGLE_ROW_MIN_WIDTH {
        CARDS_HEIGHT
    } else {
        CARDS_HEIGHT * 2
    }
}

/// Split the card area into one rect per category.
fn card_areas(area: Rect) -> Vec<Rect> {
    if area.width >= SINGLE_ROW_MIN_WIDTH {
        Layout::horizontal([Constraint::Fill(1); 4]).split(area).to_vec()
    } else {
        Layout::vertical([Constraint::Fill(1); 2])
            .split(area)
            .iter()
            .flat_map(|row| Layout::horizontal([Constraint::Fill(1); 2]).split(*row).to_vec())
            .collect()
    }
}

/// Render the four status cards.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.status_state();
    let checking = state.loading || state.health.is_none();

    for (category, card_area) in CATEGORIES.iter().zip(card_areas(area)) {
        let label = state.health.as_ref().map(|view| match category {
            StatusCategory::Backend => view.backend.as_str(),
            StatusCategory::Cpu => view.cpu.as_str(),
            StatusCategory::Db => view.db.as_str(),
            StatusCategory::Version => view.version.as_str(),
        });
        let color = label.map(status_color).unwrap_or(StatusColor::Secondary);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", category.title()),
                app.theme.status_style(color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.color(color)));

        let body = if checking {
            vec![
                Line::from(""),
                Line::from(Span::styled("⟳ Checking...", Style::default().fg(app.theme.highlight)))
                    .alignment(Alignment::Center),
            ]
        } else {
            vec![
                Line::from(vec![
                    Span::raw("Status: "),
                    Span::styled(label.unwrap_or("-").to_string(), app.theme.status_style(color)),
                ]),
                Line::from(Span::styled(
                    category.description(),
                    Style::default().add_modifier(Modifier::DIM),
                )),
            ]
        };

        let paragraph = Paragraph::new(body).block(block).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, card_area);
    }
}
