//! Status categories and their color classes.

use serde::{Deserialize, Serialize};

use crate::client::HealthPayload;

/// Default label when the payload carries no backend status.
pub const DEFAULT_BACKEND: &str = "unknown";
/// Default label when the payload carries no CPU status.
pub const DEFAULT_CPU: &str = "healthy";
/// Default label when the payload carries no database status.
pub const DEFAULT_DB: &str = "ok";
/// Default version when the payload carries none.
pub const DEFAULT_VERSION: &str = "v1.0.0";

/// The four status categories shown as cards.
///
/// Replaced as a whole on every applied poll; never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthView {
    pub backend: String,
    pub cpu: String,
    pub db: String,
    pub version: String,
}

impl HealthView {
    /// Build a view from a successful fetch, defaulting each field on its own.
    ///
    /// The defaults are deliberately not uniform: a missing CPU or DB label
    /// reads as healthy while a missing backend status reads as unknown.
    pub fn from_payload(payload: &HealthPayload) -> Self {
        Self {
            backend: payload.status().unwrap_or(DEFAULT_BACKEND).to_string(),
            cpu: payload.cpu().unwrap_or(DEFAULT_CPU).to_string(),
            db: payload.db().unwrap_or(DEFAULT_DB).to_string(),
            version: payload.version().unwrap_or(DEFAULT_VERSION).to_string(),
        }
    }

    /// The view shown after a failed fetch.
    pub fn failed() -> Self {
        Self {
            backend: "error".to_string(),
            cpu: "unknown".to_string(),
            db: "unknown".to_string(),
            version: "unknown".to_string(),
        }
    }

    /// Iterate over (category, label) pairs in display order.
    pub fn categories(&self) -> [(StatusCategory, &str); 4] {
        [
            (StatusCategory::Backend, self.backend.as_str()),
            (StatusCategory::Cpu, self.cpu.as_str()),
            (StatusCategory::Db, self.db.as_str()),
            (StatusCategory::Version, self.version.as_str()),
        ]
    }
}

/// One of the four independently defaulted status categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Backend,
    Cpu,
    Db,
    Version,
}

impl StatusCategory {
    /// Card title.
    pub fn title(&self) -> &'static str {
        match self {
            StatusCategory::Backend => "Backend Service",
            StatusCategory::Cpu => "CPU Load",
            StatusCategory::Db => "Database",
            StatusCategory::Version => "App Version",
        }
    }

    /// Card description line.
    pub fn description(&self) -> &'static str {
        match self {
            StatusCategory::Backend => "Checks if the backend service is responding.",
            StatusCategory::Cpu => "Current CPU status of the server.",
            StatusCategory::Db => "Database connection and readiness.",
            StatusCategory::Version => "Currently deployed app version.",
        }
    }
}

/// Color class of a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Success,
    Warning,
    Danger,
    Secondary,
}

impl StatusColor {
    /// Returns the class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Success => "success",
            StatusColor::Warning => "warning",
            StatusColor::Danger => "danger",
            StatusColor::Secondary => "secondary",
        }
    }
}

/// Map a status label to its color class. Total: unknown labels are secondary.
pub fn status_color(status: &str) -> StatusColor {
    match status {
        "ok" | "healthy" => StatusColor::Success,
        "degraded" | "warn" => StatusColor::Warning,
        "error" | "down" => StatusColor::Danger,
        _ => StatusColor::Secondary,
    }
}

/// Classify a CPU percentage into a status label.
pub fn cpu_level(percent: f64) -> &'static str {
    if percent < 50.0 {
        "healthy"
    } else if percent < 80.0 {
        "warn"
    } else {
        "critical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_uses_defaults() {
        let view = HealthView::from_payload(&HealthPayload::default());
        assert_eq!(view.backend, "unknown");
        assert_eq!(view.cpu, "healthy");
        assert_eq!(view.db, "ok");
        assert_eq!(view.version, "v1.0.0");
    }

    #[test]
    fn test_fields_default_independently() {
        let payload = HealthPayload {
            status: Some("degraded".to_string()),
            version: Some("".to_string()),
            ..Default::default()
        };
        let view = HealthView::from_payload(&payload);
        assert_eq!(view.backend, "degraded");
        assert_eq!(view.cpu, "healthy");
        assert_eq!(view.version, "v1.0.0");
    }

    #[test]
    fn test_failed_view() {
        let view = HealthView::failed();
        assert_eq!(view.backend, "error");
        assert_eq!(view.cpu, "unknown");
        assert_eq!(view.db, "unknown");
        assert_eq!(view.version, "unknown");
    }

    #[test]
    fn test_status_color_mapping() {
        assert_eq!(status_color("ok"), StatusColor::Success);
        assert_eq!(status_color("healthy"), StatusColor::Success);
        assert_eq!(status_color("degraded"), StatusColor::Warning);
        assert_eq!(status_color("warn"), StatusColor::Warning);
        assert_eq!(status_color("error"), StatusColor::Danger);
        assert_eq!(status_color("down"), StatusColor::Danger);
        assert_eq!(status_color("xyz"), StatusColor::Secondary);
        assert_eq!(status_color(""), StatusColor::Secondary);
        assert_eq!(status_color("OK"), StatusColor::Secondary);
        assert_eq!(status_color("degraded").as_str(), "warning");
    }

    #[test]
    fn test_cpu_level() {
        assert_eq!(cpu_level(12.0), "healthy");
        assert_eq!(cpu_level(50.0), "warn");
        assert_eq!(cpu_level(79.9), "warn");
        assert_eq!(cpu_level(80.0), "critical");
    }
}
