//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{Sample, StatusColor};

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the `success` class.
    pub success: Color,
    /// Color for the `warning` class.
    pub warning: Color,
    /// Color for the `danger` class.
    pub danger: Color,
    /// Color for the `secondary` class.
    pub secondary: Color,
    /// Color of the CPU line.
    pub series: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for section headers.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            secondary: Color::Gray,
            series: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            secondary: Color::DarkGray,
            series: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Foreground color for a status color class.
    pub fn color(&self, class: StatusColor) -> Color {
        match class {
            StatusColor::Success => self.success,
            StatusColor::Warning => self.warning,
            StatusColor::Danger => self.danger,
            StatusColor::Secondary => self.secondary,
        }
    }

    /// Get style for a status color class
    pub fn status_style(&self, class: StatusColor) -> Style {
        match class {
            StatusColor::Danger => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            other => Style::default().fg(self.color(other)),
        }
    }

    /// Marker color for a chart sample.
    pub fn sample_color(&self, sample: &Sample) -> Color {
        match sample {
            Sample::Measured(_) => self.series,
            Sample::Synthetic(_) => self.secondary,
            Sample::NoData => self.warning,
            Sample::Failed => self.danger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes_map_to_theme() {
        let theme = Theme::dark();
        assert_eq!(theme.color(StatusColor::Success), Color::Green);
        assert_eq!(theme.color(StatusColor::Danger), Color::Red);
        assert_eq!(theme.color(StatusColor::Secondary), Color::Gray);
        assert!(theme.status_style(StatusColor::Danger).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_failed_samples_stand_out() {
        let theme = Theme::light();
        assert_eq!(theme.sample_color(&Sample::Failed), theme.danger);
        assert_ne!(theme.sample_color(&Sample::Measured(1.0)), theme.danger);
    }
}
