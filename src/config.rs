//! Layered configuration.
//!
//! Settings are resolved from, in increasing priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`healthdash.toml` or `--config <FILE>`)
//! 3. Environment variables prefixed with `HEALTHDASH_` (e.g. `HEALTHDASH_BASE_URL`)
//! 4. Command-line flags
//!
//! ```toml
//! base_url = "http://localhost:8080"
//! health_path = "/health"
//! status_interval = "15s"
//! load_interval = "5s"
//! window = 20
//! timeout = "10s"
//! missing_cpu = "synthetic"
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::duration::parse_duration;
use crate::data::window::{DEFAULT_WINDOW_CAPACITY, MAX_WINDOW_CAPACITY};
use crate::sampler::MissingCpuPolicy;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "healthdash.toml";

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "HEALTHDASH";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A duration field could not be parsed.
    #[error("invalid duration for `{field}`: {value}")]
    InvalidDuration { field: &'static str, value: String },

    /// A duration field was zero.
    #[error("`{0}` must be greater than zero")]
    ZeroDuration(&'static str),

    /// The sample window cannot hold anything.
    #[error("`window` must be at least 1")]
    EmptyWindow,

    /// The sample window exceeds [`MAX_WINDOW_CAPACITY`].
    #[error("`window` must be at most {max}, got {value}")]
    WindowTooLarge { value: usize, max: usize },
}

/// Raw settings as read from file and environment.
///
/// Durations stay strings here and are parsed by [`Settings::resolve`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub health_path: String,
    pub status_interval: String,
    pub load_interval: String,
    pub window: usize,
    pub timeout: String,
    pub missing_cpu: MissingCpuPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            health_path: "/health".to_string(),
            status_interval: "15s".to_string(),
            load_interval: "5s".to_string(),
            window: DEFAULT_WINDOW_CAPACITY,
            timeout: "10s".to_string(),
            missing_cpu: MissingCpuPolicy::default(),
        }
    }
}

/// Validated configuration used to build clients and samplers.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub base_url: String,
    pub health_path: String,
    pub status_interval: Duration,
    pub load_interval: Duration,
    pub window: usize,
    pub timeout: Duration,
    pub missing_cpu: MissingCpuPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            health_path: "/health".to_string(),
            status_interval: Duration::from_secs(15),
            load_interval: Duration::from_secs(5),
            window: DEFAULT_WINDOW_CAPACITY,
            timeout: Duration::from_secs(10),
            missing_cpu: MissingCpuPolicy::Synthetic,
        }
    }
}

impl Settings {
    /// Load settings from an optional file and the environment.
    ///
    /// With `path = None`, `healthdash.toml` is read if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse and validate into a [`DashboardConfig`].
    pub fn resolve(&self) -> Result<DashboardConfig, ConfigError> {
        if self.window == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.window > MAX_WINDOW_CAPACITY {
            return Err(ConfigError::WindowTooLarge {
                value: self.window,
                max: MAX_WINDOW_CAPACITY,
            });
        }

        Ok(DashboardConfig {
            base_url: self.base_url.clone(),
            health_path: self.health_path.clone(),
            status_interval: positive_duration("status_interval", &self.status_interval)?,
            load_interval: positive_duration("load_interval", &self.load_interval)?,
            window: self.window,
            timeout: positive_duration("timeout", &self.timeout)?,
            missing_cpu: self.missing_cpu,
        })
    }
}

fn positive_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration = parse_duration(value).map_err(|_| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::ZeroDuration(field));
    }
    Ok(duration)
}
