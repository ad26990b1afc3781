//! # healthdash
//!
//! A terminal dashboard for a service health endpoint.
//!
//! Two independent samplers poll `GET /health`:
//!
//! - a **status sampler** (every 15s) that turns the payload into four status
//!   cards (backend, CPU, database, version), and
//! - a **load sampler** (every 5s) that keeps a sliding window of CPU-load
//!   samples for a rolling line chart.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │ sampler │───▶│   app    │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (tasks) │    │ (state)  │    │(render) │    │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ client  │◀── HttpHealthClient | FileHealthClient         │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`client`]**: The [`HealthClient`] trait and its HTTP and file implementations
//! - **[`sampler`]**: Poll scheduling, sequencing of overlapping polls, unmount
//! - **[`data`]**: [`HealthView`], [`LoadWindow`] and export reports
//! - **[`config`]**: Layered settings (defaults, TOML file, environment, CLI)
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! healthdash --url http://localhost:8080
//! healthdash --file health.json --load-interval 1s
//! healthdash --export report.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use healthdash::sampler::{self, StatusSampler};
//! use healthdash::HttpHealthClient;
//!
//! # tokio_test::block_on(async {
//! let client = HttpHealthClient::new("http://localhost:8080", "/health", Duration::from_secs(5))?;
//! let mut handle = sampler::spawn(StatusSampler::new(), Arc::new(client), Duration::from_secs(15));
//!
//! tokio::time::sleep(Duration::from_secs(1)).await;
//! println!("{:?}", handle.state().health);
//! handle.unmount();
//! # Ok::<_, anyhow::Error>(())
//! # });
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod data;
pub mod events;
pub mod sampler;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use client::{FetchError, FileHealthClient, HealthClient, HealthPayload, HttpHealthClient};
pub use config::{DashboardConfig, Settings};
pub use data::{status_color, HealthReport, HealthView, LoadWindow, Sample, StatusColor};
pub use sampler::{LoadSampler, MissingCpuPolicy, SamplerHandle, StatusSampler};
