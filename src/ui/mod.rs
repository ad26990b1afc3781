//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`cards`]: The four status cards (backend, CPU, database, version)
//! - [`chart`]: Rolling CPU-load line chart
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Status cards (cards::render)         │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ CPU chart (chart::render)            │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod cards;
pub mod chart;
pub mod common;
pub mod theme;

pub use theme::Theme;

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::app::App;

/// Height of the status card row.
pub const CARDS_HEIGHT: u16 = 6;

/// Render the whole dashboard into the frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let cards_height = cards::required_height(area.width);

    let chunks = Layout::vertical([
        Constraint::Length(1),            // Header bar
        Constraint::Length(cards_height), // Status cards
        Constraint::Min(6),               // CPU chart
        Constraint::Length(1),            // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    cards::render(frame, app, chunks[1]);
    chart::render(frame, app, chunks[2]);
    common::render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
