//! Data source abstraction for acquiring statistics snapshots.
//!
//! This module provides a trait-based abstraction for fetching the server
//! statistics document from various backends (HTTP endpoint, local file,
//! in-memory channel).

mod channel;
mod file;
mod http;
mod snapshot;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use http::HttpSource;
pub use snapshot::{
    AppHealth, ApplicationStatus, OverallHealth, RequestStats, StatusSnapshot, SystemPerformance,
    SystemUptime, DEFAULT_APPLICATIONS, DEFAULT_APP_VERSION, UNAVAILABLE_MESSAGE,
};

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while fetching a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse the statistics document.
    #[error("Failed to parse snapshot: {0}")]
    Parse(String),

    /// Connection to the endpoint failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for the endpoint.
    #[error("Request timed out")]
    Timeout,

    /// Reading a local statistics file failed.
    #[error("Read error: {0}")]
    Read(String),

    /// The source was closed and can produce no further snapshots.
    #[error("Source closed: {0}")]
    Closed(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Connection(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// Trait for fetching statistics snapshots from various backends.
///
/// `fetch` is allowed to fail; callers that need the never-fails guarantee
/// go through [`fetch_or_fallback`].
#[async_trait]
pub trait SnapshotSource: Send + Debug {
    /// Fetch the latest snapshot.
    ///
    /// Implementations must bound their own waiting: a hung backend should
    /// surface as [`SourceError::Timeout`], not stall the caller forever.
    async fn fetch(&mut self) -> Result<StatusSnapshot, SourceError>;

    /// Human-readable description of the source, shown in the status bar.
    fn description(&self) -> &str;
}

/// Fetch a snapshot, substituting a local fallback on any failure.
///
/// This is the boundary the update cycle relies on: it never returns an
/// error, only a valid snapshot. Failures are logged as warnings and show up
/// in the panel as Unknown/WARNING states.
pub async fn fetch_or_fallback(
    source: &mut (dyn SnapshotSource + '_),
    applications: &[String],
) -> StatusSnapshot {
    match source.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(source = source.description(), error = %e, "falling back to local snapshot");
            StatusSnapshot::fallback(applications)
        }
    }
}
