//! Wire types for server statistics snapshots.
//!
//! These types match the JSON document produced by the statistics exporter
//! on the hub server. Field names on the wire are PascalCase; this module is
//! the consumer-side mirror of that contract, it does not own the format.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Issue message used in locally synthesized fallback snapshots.
pub const UNAVAILABLE_MESSAGE: &str = "Server statistics unavailable";

/// Default version string shown for applications that don't report one.
pub const DEFAULT_APP_VERSION: &str = "v1.0.0";

/// Application names tracked by default.
pub const DEFAULT_APPLICATIONS: [&str; 5] = ["CFAi", "Condor", "Textraction", "APIHub", "FFAi"];

/// A complete statistics snapshot for one server at a point in time.
///
/// A snapshot is immutable once fetched; each update cycle replaces the
/// previous one entirely, there is no merging of partial documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// ISO datetime the exporter produced this document.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    #[serde(rename = "ServerName")]
    pub server_name: String,

    #[serde(rename = "SystemUptime")]
    pub system_uptime: SystemUptime,

    #[serde(rename = "SystemPerformance")]
    pub system_performance: SystemPerformance,

    #[serde(rename = "IISRequestStats")]
    pub request_stats: RequestStats,

    /// Per-application health, keyed by application name.
    #[serde(rename = "CFAiApplications")]
    pub applications: BTreeMap<String, ApplicationStatus>,

    #[serde(rename = "OverallHealth")]
    pub overall_health: OverallHealth,
}

/// System uptime broken into display units by the exporter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemUptime {
    #[serde(rename = "Days")]
    pub days: u64,
    #[serde(rename = "Hours")]
    pub hours: u64,
    #[serde(rename = "Minutes")]
    pub minutes: u64,
}

/// Host-level performance counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemPerformance {
    /// CPU load, 0-100.
    #[serde(rename = "CPU")]
    pub cpu: f64,
    #[serde(rename = "AvailableMemoryMB")]
    pub available_memory_mb: f64,
    #[serde(rename = "DiskUsage")]
    pub disk_usage: f64,
    #[serde(rename = "TotalMemoryGB")]
    pub total_memory_gb: f64,
}

/// IIS request counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestStats {
    #[serde(rename = "CurrentConnections")]
    pub current_connections: u64,
    #[serde(rename = "RequestsPerSecond")]
    pub requests_per_second: f64,
}

/// Health of a single hub application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationStatus {
    #[serde(rename = "OverallStatus")]
    pub status: AppHealth,

    #[serde(rename = "LastChecked")]
    pub last_checked: String,

    /// Deployed version, if the application reports one.
    #[serde(rename = "Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ApplicationStatus {
    /// Version string for display, substituting the default when unreported.
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_APP_VERSION)
    }
}

/// Reported health state of an application.
///
/// The exporter emits "Online", "Offline" or "Unknown"; anything else
/// deserializes as [`AppHealth::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppHealth {
    Online,
    Offline,
    #[serde(other)]
    Unknown,
}

impl AppHealth {
    /// Returns true only for a confirmed online application.
    pub fn is_online(&self) -> bool {
        matches!(self, AppHealth::Online)
    }
}

/// Server-wide health summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallHealth {
    /// "Healthy" when everything checks out; any other value is degraded.
    #[serde(rename = "Status")]
    pub status: String,

    /// Ordered list of detected problems, empty when healthy.
    #[serde(rename = "Issues")]
    pub issues: Vec<String>,
}

impl OverallHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "Healthy"
    }
}

impl StatusSnapshot {
    /// Synthesize a local fallback snapshot for when the statistics document
    /// cannot be fetched: every status Unknown, zeroed metrics, and a single
    /// issue explaining the gap. Timestamps are set to the current time.
    pub fn fallback(applications: &[String]) -> Self {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let apps = applications
            .iter()
            .map(|name| {
                (
                    name.clone(),
                    ApplicationStatus {
                        status: AppHealth::Unknown,
                        last_checked: now.clone(),
                        version: None,
                    },
                )
            })
            .collect();

        Self {
            timestamp: now,
            server_name: "localhost".to_string(),
            system_uptime: SystemUptime::default(),
            system_performance: SystemPerformance::default(),
            request_stats: RequestStats::default(),
            applications: apps,
            overall_health: OverallHealth {
                status: "Unknown".to_string(),
                issues: vec![UNAVAILABLE_MESSAGE.to_string()],
            },
        }
    }

    /// Render the snapshot timestamp in local time for display.
    ///
    /// Timestamps that don't parse as RFC 3339 are shown verbatim rather
    /// than dropped.
    pub fn local_timestamp(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.timestamp) {
            Ok(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "Timestamp": "2025-11-03T09:30:00Z",
            "ServerName": "HUB-PROD-01",
            "SystemUptime": { "Days": 2, "Hours": 5, "Minutes": 10 },
            "SystemPerformance": {
                "CPU": 42.5,
                "AvailableMemoryMB": 2048,
                "DiskUsage": 61.2,
                "TotalMemoryGB": 16
            },
            "IISRequestStats": { "CurrentConnections": 37, "RequestsPerSecond": 12.4 },
            "CFAiApplications": {
                "CFAi": { "OverallStatus": "Online", "LastChecked": "2025-11-03T09:29:55Z", "Version": "v2.1.0" },
                "Condor": { "OverallStatus": "Offline", "LastChecked": "2025-11-03T09:29:55Z" }
            },
            "OverallHealth": { "Status": "Healthy", "Issues": [] }
        }"#;

        let snapshot: StatusSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.server_name, "HUB-PROD-01");
        assert_eq!(snapshot.system_uptime.days, 2);
        assert_eq!(snapshot.system_uptime.minutes, 10);
        assert_eq!(snapshot.request_stats.current_connections, 37);
        assert!(snapshot.overall_health.is_healthy());

        let cfai = snapshot.applications.get("CFAi").unwrap();
        assert!(cfai.status.is_online());
        assert_eq!(cfai.version_or_default(), "v2.1.0");

        let condor = snapshot.applications.get("Condor").unwrap();
        assert_eq!(condor.status, AppHealth::Offline);
        assert_eq!(condor.version_or_default(), DEFAULT_APP_VERSION);
    }

    #[test]
    fn test_unrecognized_status_is_unknown() {
        let json = r#"{ "OverallStatus": "Flaky", "LastChecked": "2025-11-03T09:29:55Z" }"#;
        let app: ApplicationStatus = serde_json::from_str(json).unwrap();
        assert_eq!(app.status, AppHealth::Unknown);
        assert!(!app.status.is_online());
    }

    #[test]
    fn test_fallback_invariants() {
        let apps: Vec<String> = DEFAULT_APPLICATIONS.iter().map(|s| s.to_string()).collect();
        let snapshot = StatusSnapshot::fallback(&apps);

        assert_eq!(snapshot.overall_health.status, "Unknown");
        assert!(!snapshot.overall_health.is_healthy());
        assert!(!snapshot.overall_health.issues.is_empty());
        assert_eq!(snapshot.overall_health.issues[0], UNAVAILABLE_MESSAGE);

        assert_eq!(snapshot.applications.len(), 5);
        for app in snapshot.applications.values() {
            assert_eq!(app.status, AppHealth::Unknown);
        }

        assert_eq!(snapshot.system_uptime.days, 0);
        assert_eq!(snapshot.system_performance.cpu, 0.0);
        assert_eq!(snapshot.request_stats.current_connections, 0);
    }

    #[test]
    fn test_local_timestamp_falls_back_to_raw() {
        let apps = vec!["CFAi".to_string()];
        let mut snapshot = StatusSnapshot::fallback(&apps);
        snapshot.timestamp = "not-a-date".to_string();
        assert_eq!(snapshot.local_timestamp(), "not-a-date");
    }
}
