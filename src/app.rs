//! Application state.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;

use crate::client::HealthClient;
use crate::config::DashboardConfig;
use crate::data::HealthReport;
use crate::sampler::{self, LoadSampler, LoadState, SamplerHandle, StatusSampler, StatusState};
use crate::ui::Theme;

/// How long a status message stays in the status bar.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Owns both sampler handles; dropping the app unmounts them.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub config: DashboardConfig,

    endpoint: String,
    status: SamplerHandle<StatusState>,
    load: SamplerHandle<LoadState>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app and mount both samplers on the current tokio runtime.
    pub fn new(client: Arc<dyn HealthClient>, config: DashboardConfig) -> Self {
        Self::with_theme(client, config, Theme::auto_detect())
    }

    /// Same as [`App::new`] with an explicit theme.
    pub fn with_theme(client: Arc<dyn HealthClient>, config: DashboardConfig, theme: Theme) -> Self {
        let endpoint = client.description().to_string();
        let status = sampler::spawn(StatusSampler::new(), client.clone(), config.status_interval);
        let load = sampler::spawn(
            LoadSampler::new(config.window, config.missing_cpu),
            client,
            config.load_interval,
        );

        Self {
            running: true,
            show_help: false,
            config,
            endpoint,
            status,
            load,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the polled endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Current status card state.
    pub fn status_state(&self) -> StatusState {
        self.status.state()
    }

    /// Current CPU chart state.
    pub fn load_state(&self) -> LoadState {
        self.load.state()
    }

    /// When either sampler last applied a result.
    pub fn last_updated(&self) -> Option<Instant> {
        let status = self.status.borrow().updated_at;
        let load = self.load.borrow().updated_at;
        status.max(load)
    }

    /// Most recent fetch error, if the latest applied poll of either sampler failed.
    pub fn last_error(&self) -> Option<String> {
        self.status.borrow().last_error.clone().or_else(|| self.load.borrow().last_error.clone())
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// Poll both samplers right away.
    pub fn refresh(&mut self) {
        self.status.poll_now();
        self.load.poll_now();
        self.set_status_message("Refreshing...".to_string());
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Unmount both samplers. Their state stays readable.
    pub fn shutdown(&mut self) {
        self.status.unmount();
        self.load.unmount();
        info!("dashboard shut down");
    }

    /// Snapshot of the current state for export.
    pub fn report(&self) -> HealthReport {
        let status = self.status.borrow();
        let load = self.load.borrow();
        HealthReport::new(&self.endpoint, status.health.as_ref(), &load.window)
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        self.report().write_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FetchError, HealthPayload};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedClient;

    #[async_trait]
    impl HealthClient for FixedClient {
        async fn fetch_health(&self) -> Result<HealthPayload, FetchError> {
            Ok(HealthPayload {
                status: Some("ok".to_string()),
                cpu_percent: Some(37.25),
                ..Default::default()
            })
        }

        fn description(&self) -> &str {
            "fixed"
        }
    }

    fn app() -> App {
        App::with_theme(Arc::new(FixedClient), DashboardConfig::default(), Theme::dark())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_poll_fills_both_widgets() {
        let app = app();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let status = app.status_state();
        assert!(!status.loading);
        assert_eq!(status.health.unwrap().backend, "ok");
        assert_eq!(app.load_state().window.display_values(), vec![37.3]);
        assert!(app.last_updated().is_some());
        assert!(app.last_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_polls_immediately() {
        let mut app = app();
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(app.load_state().window.len(), 2);
        assert_eq!(app.get_status_message(), Some("Refreshing..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_state() {
        let app = app();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("health_export.json");
        app.export_state(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"endpoint\": \"fixed\""));
    }

    #[tokio::test]
    async fn test_quit_and_help() {
        let mut app = app();
        app.toggle_help();
        assert!(app.show_help);
        app.quit();
        assert!(!app.running);
        app.shutdown();
    }
}
