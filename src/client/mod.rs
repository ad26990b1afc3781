//! Health endpoint clients.
//!
//! This module provides a trait-based abstraction over the single external
//! collaborator of the dashboard: something that can fetch a [`HealthPayload`].
//! Clients are stateless and safe to call concurrently from several samplers.

mod error;
mod file;
mod http;
mod payload;

pub use error::FetchError;
pub use file::FileHealthClient;
pub use http::HttpHealthClient;
pub use payload::HealthPayload;

use std::fmt::Debug;

use async_trait::async_trait;

/// Trait for fetching the current health payload.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use healthdash::{HealthClient, HttpHealthClient};
///
/// # tokio_test::block_on(async {
/// let client = HttpHealthClient::new("http://localhost:8080", "/health", Duration::from_secs(5))?;
/// let payload = client.fetch_health().await?;
/// println!("backend: {:?}", payload.status);
/// # Ok::<_, anyhow::Error>(())
/// # });
/// ```
#[async_trait]
pub trait HealthClient: Send + Sync + Debug {
    /// Fetch the health payload once.
    ///
    /// Any failure (network, non-2xx status, undecodable body) is reported as
    /// a [`FetchError`].
    async fn fetch_health(&self) -> Result<HealthPayload, FetchError>;

    /// Returns a human-readable description of the endpoint.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
