//! HTTP data source.
//!
//! Fetches the statistics document from an HTTP endpoint. Requests carry a
//! cache-busting query parameter so intermediaries never serve a stale
//! snapshot, and are time-bounded by the client timeout so a hung server
//! cannot stall an update cycle past the next tick.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::Client;

use super::{SnapshotSource, SourceError, StatusSnapshot};

/// A data source that fetches snapshots from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
    description: String,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// The endpoint being polled.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn cache_buster() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&mut self) -> Result<StatusSnapshot, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("t", Self::cache_buster().to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "endpoint returned status {}",
                response.status()
            )));
        }

        let snapshot: StatusSnapshot = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for [`HttpSource`].
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl HttpSourceBuilder {
    /// Set the statistics endpoint (e.g. "http://hub.local/data/server-stats.json").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the source.
    pub fn build(self) -> HttpSource {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| "http://localhost/data/server-stats.json".to_string());
        let description = format!("http: {}", endpoint);

        HttpSource {
            client,
            endpoint,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let source = HttpSource::builder().build();
        assert_eq!(source.endpoint(), "http://localhost/data/server-stats.json");
        assert_eq!(
            source.description(),
            "http: http://localhost/data/server-stats.json"
        );
    }

    #[test]
    fn test_builder_custom() {
        let source = HttpSource::builder()
            .endpoint("http://hub-prod-01:8080/stats.json")
            .timeout(Duration::from_secs(3))
            .build();
        assert_eq!(source.endpoint(), "http://hub-prod-01:8080/stats.json");
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        // Port 9 (discard) should refuse promptly on loopback
        let mut source = HttpSource::builder()
            .endpoint("http://127.0.0.1:9/stats.json")
            .timeout(Duration::from_millis(500))
            .build();

        let result = source.fetch().await;
        assert!(result.is_err());
    }
}
