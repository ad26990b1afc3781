//! Wire format of the health endpoint.
//!
//! Every field is optional. The backend normally answers with
//! `{"status":"ok","cpu":"healthy","cpu_percent":12.5,"db":"ok","version":"v0.1.0"}`
//! but the dashboard has to cope with any subset of it.

use serde::{Deserialize, Serialize};

/// Raw response body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    /// Overall backend status (e.g. "ok").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Coarse CPU status label (e.g. "healthy", "warn").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    /// Database status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,

    /// Deployed application version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current CPU load as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
}

impl HealthPayload {
    /// Backend status, treating empty strings as absent.
    pub fn status(&self) -> Option<&str> {
        non_empty(&self.status)
    }

    /// CPU label, treating empty strings as absent.
    pub fn cpu(&self) -> Option<&str> {
        non_empty(&self.cpu)
    }

    /// Database label, treating empty strings as absent.
    pub fn db(&self) -> Option<&str> {
        non_empty(&self.db)
    }

    /// Version, treating empty strings as absent.
    pub fn version(&self) -> Option<&str> {
        non_empty(&self.version)
    }

    /// CPU percentage if it carries a usable reading.
    ///
    /// Zero and NaN count as "no reading": the backend reports `0` when it
    /// could not sample the CPU.
    pub fn cpu_percent(&self) -> Option<f64> {
        self.cpu_percent.filter(|v| *v != 0.0 && !v.is_nan())
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
