//! Serializable export of the dashboard state.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::status::{cpu_level, status_color, HealthView, StatusColor};
use super::window::{round1, LoadWindow, Sample};

/// One status card in an export.
#[derive(Debug, Clone, Serialize)]
pub struct CardReport {
    pub category: String,
    pub status: String,
    pub color: StatusColor,
}

/// Summary of the CPU window in an export.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub capacity: usize,
    pub samples: Vec<Sample>,
    /// Rounded values as plotted.
    pub series: Vec<f64>,
    pub latest: Option<f64>,
    pub latest_level: Option<&'static str>,
    pub measured_mean: Option<f64>,
    pub failed: usize,
}

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub endpoint: String,
    pub cards: Vec<CardReport>,
    pub load: LoadReport,
}

impl HealthReport {
    /// Build a report from the current view and window.
    pub fn new(endpoint: &str, health: Option<&HealthView>, window: &LoadWindow) -> Self {
        let cards = health
            .map(|view| {
                view.categories()
                    .iter()
                    .map(|(category, status)| CardReport {
                        category: category.title().to_string(),
                        status: status.to_string(),
                        color: status_color(status),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let latest = window.latest().filter(|s| !s.is_gap()).map(Sample::value);

        let load = LoadReport {
            capacity: window.capacity(),
            samples: window.iter().copied().collect(),
            series: window.display_values(),
            latest: latest.map(round1),
            latest_level: latest.map(cpu_level),
            measured_mean: window.measured_mean().map(round1),
            failed: window.iter().filter(|s| matches!(s, Sample::Failed)).count(),
        };

        Self {
            endpoint: endpoint.to_string(),
            cards,
            load,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
