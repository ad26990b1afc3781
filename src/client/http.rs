//! HTTP health client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{FetchError, HealthClient, HealthPayload};

/// Fetches the health payload with a plain `GET` against the configured URL.
#[derive(Debug, Clone)]
pub struct HttpHealthClient {
    client: Client,
    url: String,
}

impl HttpHealthClient {
    /// Create a client for `{base_url}{path}` with the given request timeout.
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            url: join_url(base_url, path),
        })
    }

    /// Returns the full URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HealthClient for HttpHealthClient {
    async fn fetch_health(&self) -> Result<HealthPayload, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let payload: HealthPayload = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(url = %self.url, ?payload, "fetched health payload");
        Ok(payload)
    }

    fn description(&self) -> &str {
        &self.url
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}
