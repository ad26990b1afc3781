//! Sliding window of CPU-load samples for the chart.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of samples kept in the window.
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;

/// Largest window capacity accepted from configuration.
pub const MAX_WINDOW_CAPACITY: usize = 10_000;

/// One CPU-load sample.
///
/// Failed fetches and missing readings still occupy a slot in the window and
/// plot as zero, but keep their tag so the chart can tell them apart from a
/// genuinely idle CPU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sample {
    /// A `cpu_percent` reported by the endpoint.
    Measured(f64),
    /// Random stand-in used when the endpoint reports no CPU percentage.
    Synthetic(f64),
    /// The endpoint reported no CPU percentage and no stand-in was generated.
    NoData,
    /// The fetch failed.
    Failed,
}

impl Sample {
    /// Full-precision value to plot.
    pub fn value(&self) -> f64 {
        match self {
            Sample::Measured(v) | Sample::Synthetic(v) => *v,
            Sample::NoData | Sample::Failed => 0.0,
        }
    }

    /// Value rounded to one decimal place for display.
    pub fn display_value(&self) -> f64 {
        round1(self.value())
    }

    /// Whether this sample came from a real reading.
    pub fn is_measured(&self) -> bool {
        matches!(self, Sample::Measured(_))
    }

    /// Whether this sample stands for a gap (failed fetch or no reading).
    pub fn is_gap(&self) -> bool {
        matches!(self, Sample::NoData | Sample::Failed)
    }
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Fixed-capacity FIFO window of samples, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for LoadWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl LoadWindow {
    /// Create an empty window. The capacity is clamped to
    /// `1..=MAX_WINDOW_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity: capacity.clamp(1, MAX_WINDOW_CAPACITY),
        }
    }

    /// Append a sample, evicting from the front while over capacity.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Chart points: x is the 1-based position in the visible window.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| ((i + 1) as f64, s.value()))
            .collect()
    }

    /// Rounded series values as displayed.
    pub fn display_values(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::display_value).collect()
    }

    /// Mean of the measured samples, ignoring stand-ins and gaps.
    pub fn measured_mean(&self) -> Option<f64> {
        let measured: Vec<f64> =
            self.samples.iter().filter(|s| s.is_measured()).map(Sample::value).collect();
        if measured.is_empty() {
            return None;
        }
        Some(measured.iter().sum::<f64>() / measured.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut window = LoadWindow::new(3);
        window.push(Sample::Measured(1.0));
        window.push(Sample::Measured(2.0));
        assert_eq!(window.len(), 2);
        assert_eq!(window.latest(), Some(&Sample::Measured(2.0)));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut window = LoadWindow::default();
        for i in 0..21 {
            window.push(Sample::Measured(i as f64));
        }
        assert_eq!(window.len(), 20);
        assert_eq!(window.iter().next(), Some(&Sample::Measured(1.0)));
        assert_eq!(window.latest(), Some(&Sample::Measured(20.0)));
    }

    #[test]
    fn test_points_are_one_based_positions() {
        let mut window = LoadWindow::new(2);
        window.push(Sample::Measured(10.0));
        window.push(Sample::Failed);
        window.push(Sample::Measured(30.0));
        assert_eq!(window.points(), vec![(1.0, 0.0), (2.0, 30.0)]);
    }

    #[test]
    fn test_display_rounding() {
        assert_eq!(Sample::Measured(42.37).display_value(), 42.4);
        assert_eq!(Sample::Measured(42.37).value(), 42.37);
        assert_eq!(Sample::Measured(99.95).display_value(), 100.0);
        assert_eq!(Sample::Failed.display_value(), 0.0);
    }

    #[test]
    fn test_gap_samples_plot_as_zero() {
        assert_eq!(Sample::Failed.value(), 0.0);
        assert_eq!(Sample::NoData.value(), 0.0);
        assert!(Sample::Failed.is_gap());
        assert!(!Sample::Synthetic(3.0).is_gap());
    }

    #[test]
    fn test_measured_mean_ignores_gaps() {
        let mut window = LoadWindow::default();
        assert_eq!(window.measured_mean(), None);
        window.push(Sample::Measured(10.0));
        window.push(Sample::Failed);
        window.push(Sample::Synthetic(90.0));
        window.push(Sample::Measured(20.0));
        assert_eq!(window.measured_mean(), Some(15.0));
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let mut window = LoadWindow::new(0);
        window.push(Sample::Measured(1.0));
        window.push(Sample::Measured(2.0));
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_oversized_capacity_is_clamped() {
        let mut window = LoadWindow::new(usize::MAX);
        assert_eq!(window.capacity(), MAX_WINDOW_CAPACITY);
        window.push(Sample::Measured(5.0));
        assert_eq!(window.len(), 1);

        assert_eq!(LoadWindow::new(1 << 62).capacity(), MAX_WINDOW_CAPACITY);
    }
}
