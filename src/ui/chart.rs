//! CPU-load chart rendering.
//!
//! The x axis is the 1-based position of each sample in the visible window,
//! so labels shift as the window slides. The y axis is fixed to [0, 100].

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_duration;
use crate::data::window::round1;
use crate::data::{cpu_level, status_color, Sample};

/// Interpolated points drawn between two consecutive samples.
const SMOOTHING_STEPS: usize = 8;

/// Y axis range.
const Y_BOUNDS: [f64; 2] = [0.0, 100.0];

/// Catmull-Rom interpolation through `points`.
///
/// The curve passes through every input point; `steps` points are produced per
/// segment. Y values are clamped to the chart range so overshoot never leaves
/// the axis.
pub fn smooth(points: &[(f64, f64)], steps: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || steps < 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(last * steps + 1);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let x = catmull_rom(p0.0, p1.0, p2.0, p3.0, t);
            let y = catmull_rom(p0.1, p1.1, p2.1, p3.1, t).clamp(Y_BOUNDS[0], Y_BOUNDS[1]);
            out.push((x, y));
        }
    }
    out.push(points[last]);
    out
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Time covered by a full window, or `None` if it does not fit a `Duration`.
fn window_span(interval: Duration, capacity: usize) -> Option<Duration> {
    u32::try_from(capacity).ok().and_then(|n| interval.checked_mul(n))
}

/// X bounds and edge labels for `len` samples.
///
/// The bounds are at least `[1, 2]` so a lone sample still gets an axis, but the
/// right label only names a position that holds a sample.
fn x_axis_layout(len: usize) -> ([f64; 2], [String; 2]) {
    let upper = if len >= 2 { len.to_string() } else { String::new() };
    ([1.0, len.max(2) as f64], ["1".to_string(), upper])
}

/// Render the CPU-load chart.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.load_state();
    let window = &state.window;

    let heading = match window_span(app.config.load_interval, window.capacity()) {
        Some(span) => format!(" CPU Load (last ~{}) ", format_duration(span)),
        None => " CPU Load ".to_string(),
    };
    let mut title = vec![Span::styled(heading, app.theme.header)];
    if let Some(sample) = window.latest().filter(|s| !s.is_gap()) {
        let level = cpu_level(sample.value());
        title.push(Span::styled(
            format!("{:.1}% {} ", round1(sample.value()), level),
            app.theme.status_style(status_color(level)),
        ));
    }
    if matches!(window.latest(), Some(Sample::Failed)) {
        title.push(Span::styled("fetch failed ", app.theme.status_style(status_color("error"))));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if window.is_empty() {
        let paragraph = Paragraph::new("Waiting for samples...")
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let points = window.points();
    let line = smooth(&points, SMOOTHING_STEPS);

    let failed: Vec<(f64, f64)> = window
        .iter()
        .zip(&points)
        .filter(|(s, _)| matches!(s, Sample::Failed))
        .map(|(_, p)| *p)
        .collect();
    let synthetic: Vec<(f64, f64)> = window
        .iter()
        .zip(&points)
        .filter(|(s, _)| matches!(s, Sample::Synthetic(_) | Sample::NoData))
        .map(|(_, p)| *p)
        .collect();

    let mut datasets = vec![Dataset::default()
        .name("CPU Load")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&line)];
    if !synthetic.is_empty() {
        datasets.push(
            Dataset::default()
                .name("no reading")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(app.theme.sample_color(&Sample::NoData)))
                .data(&synthetic),
        );
    }
    if !failed.is_empty() {
        datasets.push(
            Dataset::default()
                .name("failed")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(app.theme.sample_color(&Sample::Failed)))
                .data(&failed),
        );
    }

    let (x_bounds, x_labels) = x_axis_layout(window.len());
    let x_axis = Axis::default()
        .style(Style::default().fg(app.theme.border))
        .bounds(x_bounds)
        .labels(x_labels);
    let y_axis = Axis::default()
        .title("CPU %")
        .style(Style::default().fg(app.theme.border))
        .bounds(Y_BOUNDS)
        .labels(["0", "50", "100"]);

    let chart = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    frame.render_widget(chart, area);
}
