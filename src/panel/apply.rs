//! Snapshot application: rewriting panel lines from a fetched snapshot.
//!
//! A pure panel mutation given a snapshot; no I/O, no timers. Each rewrite
//! step is independently best-effort: a missing slot is silently skipped.
//! Re-applying the same snapshot leaves the panel unchanged; the metrics
//! block and timestamp line are created at most once.

use crate::source::{AppHealth, StatusSnapshot};

use super::{LineStyle, Panel, PanelLine, Slot};

/// Apply a snapshot to the panel.
pub fn apply_snapshot(panel: &mut Panel, snapshot: &StatusSnapshot) {
    update_uptime(panel, snapshot);
    update_server_status(panel, snapshot);
    update_database(panel, snapshot);
    update_auth_service(panel, snapshot);
    update_applications(panel, snapshot);
    upsert_metrics(panel, snapshot);
    panel.upsert_timestamp(format!("Last Updated: {}", snapshot.local_timestamp()));
}

fn update_uptime(panel: &mut Panel, snapshot: &StatusSnapshot) {
    if let Some(line) = panel.slot_mut(&Slot::Uptime) {
        let uptime = &snapshot.system_uptime;
        line.text = format!(
            "System Uptime: {} days, {} hours, {} minutes",
            uptime.days, uptime.hours, uptime.minutes
        );
    }
}

fn update_server_status(panel: &mut Panel, snapshot: &StatusSnapshot) {
    if let Some(line) = panel.slot_mut(&Slot::ServerStatus) {
        if snapshot.overall_health.is_healthy() {
            line.text = "✓ Server Status: ONLINE".to_string();
            line.style = LineStyle::Success;
        } else {
            line.text = "⚠ Server Status: WARNING".to_string();
            line.style = LineStyle::Warning;
        }
    }
}

fn update_database(panel: &mut Panel, snapshot: &StatusSnapshot) {
    if let Some(line) = panel.slot_mut(&Slot::Database) {
        let state = if snapshot.overall_health.is_healthy() {
            "ACTIVE"
        } else {
            "DEGRADED"
        };
        line.text = format!("✓ Database Connection: {}", state);
    }
}

fn update_auth_service(panel: &mut Panel, snapshot: &StatusSnapshot) {
    if let Some(line) = panel.slot_mut(&Slot::AuthService) {
        let state = if snapshot.overall_health.is_healthy() {
            "RUNNING"
        } else {
            "DEGRADED"
        };
        line.text = format!("✓ Authentication Service: {}", state);
    }
}

/// Rewrite every application line whose name appears in the snapshot.
///
/// Slotted application lines are matched by their slot. Slotless
/// success-styled lines fall back to the `"✓ <Name>:"` text pattern, the de
/// facto protocol of the original console template; lines that match
/// neither are left untouched.
fn update_applications(panel: &mut Panel, snapshot: &StatusSnapshot) {
    for line in panel.lines_mut() {
        let name = match &line.slot {
            Some(Slot::App(name)) => name.clone(),
            Some(_) => continue,
            None => {
                if line.style != LineStyle::Success {
                    continue;
                }
                match extract_app_name(&line.text) {
                    Some(name) => name.to_string(),
                    None => continue,
                }
            }
        };

        let Some(app) = snapshot.applications.get(&name) else {
            continue;
        };

        let state = if app.status.is_online() {
            "ONLINE"
        } else {
            "OFFLINE"
        };
        line.text = format!("✓ {}: {} ({})", name, state, app.version_or_default());
        line.style = match app.status {
            AppHealth::Online => LineStyle::Success,
            _ => LineStyle::Error,
        };
    }
}

fn upsert_metrics(panel: &mut Panel, snapshot: &StatusSnapshot) {
    let perf = &snapshot.system_performance;
    let requests = &snapshot.request_stats;

    let cpu_text = format!(
        "CPU Usage: {}% | Memory: {} MB Available",
        perf.cpu, perf.available_memory_mb
    );
    let requests_text = format!(
        "Active Connections: {} | Requests/sec: {}",
        requests.current_connections, requests.requests_per_second
    );

    if panel.has_slot(&Slot::MetricsCpu) {
        if let Some(line) = panel.slot_mut(&Slot::MetricsCpu) {
            line.text = cpu_text;
        }
        if let Some(line) = panel.slot_mut(&Slot::MetricsRequests) {
            line.text = requests_text;
        }
        return;
    }

    panel.insert_before_last_prompt(vec![
        PanelLine::with_slot(Slot::MetricsCpu, LineStyle::Info, cpu_text),
        PanelLine::with_slot(Slot::MetricsRequests, LineStyle::Info, requests_text),
    ]);
}

/// Extract an application name from a `"✓ <Name>:"` line.
///
/// The name is the run of word characters between the check mark and a
/// colon; anything else yields `None`.
pub fn extract_app_name(text: &str) -> Option<&str> {
    let rest = text.split('✓').nth(1)?;
    let trimmed = rest.trim_start();
    let end = trimmed.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    if end == 0 || !trimmed[end..].starts_with(':') {
        return None;
    }
    Some(&trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ApplicationStatus, DEFAULT_APPLICATIONS};

    fn tracked() -> Vec<String> {
        DEFAULT_APPLICATIONS.iter().map(|s| s.to_string()).collect()
    }

    fn healthy_snapshot() -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::fallback(&tracked());
        snapshot.overall_health.status = "Healthy".to_string();
        snapshot.overall_health.issues.clear();
        snapshot.system_uptime.days = 2;
        snapshot.system_uptime.hours = 5;
        snapshot.system_uptime.minutes = 10;
        snapshot
    }

    #[test]
    fn test_uptime_format() {
        let mut panel = Panel::template(&tracked());
        apply_snapshot(&mut panel, &healthy_snapshot());

        assert_eq!(
            panel.slot(&Slot::Uptime).unwrap().text,
            "System Uptime: 2 days, 5 hours, 10 minutes"
        );
    }

    #[test]
    fn test_server_status_healthy() {
        let mut panel = Panel::template(&tracked());
        apply_snapshot(&mut panel, &healthy_snapshot());

        let line = panel.slot(&Slot::ServerStatus).unwrap();
        assert_eq!(line.text, "✓ Server Status: ONLINE");
        assert_eq!(line.style, LineStyle::Success);

        assert_eq!(
            panel.slot(&Slot::Database).unwrap().text,
            "✓ Database Connection: ACTIVE"
        );
        assert_eq!(
            panel.slot(&Slot::AuthService).unwrap().text,
            "✓ Authentication Service: RUNNING"
        );
    }

    #[test]
    fn test_server_status_degraded() {
        let mut panel = Panel::template(&tracked());
        let mut snapshot = healthy_snapshot();
        snapshot.overall_health.status = "Degraded".to_string();
        apply_snapshot(&mut panel, &snapshot);

        let line = panel.slot(&Slot::ServerStatus).unwrap();
        assert_eq!(line.text, "⚠ Server Status: WARNING");
        assert_eq!(line.style, LineStyle::Warning);

        assert_eq!(
            panel.slot(&Slot::Database).unwrap().text,
            "✓ Database Connection: DEGRADED"
        );
        assert_eq!(
            panel.slot(&Slot::AuthService).unwrap().text,
            "✓ Authentication Service: DEGRADED"
        );
    }

    #[test]
    fn test_application_online_with_version() {
        let mut panel = Panel::template(&tracked());
        let mut snapshot = healthy_snapshot();
        snapshot.applications.insert(
            "Condor".to_string(),
            ApplicationStatus {
                status: AppHealth::Online,
                last_checked: "2025-11-03T09:29:55Z".to_string(),
                version: Some("v2.3.1".to_string()),
            },
        );
        apply_snapshot(&mut panel, &snapshot);

        let line = panel.slot(&Slot::App("Condor".to_string())).unwrap();
        assert_eq!(line.text, "✓ Condor: ONLINE (v2.3.1)");
        assert_eq!(line.style, LineStyle::Success);
    }

    #[test]
    fn test_application_offline_default_version() {
        let mut panel = Panel::template(&tracked());
        let mut snapshot = healthy_snapshot();
        snapshot.applications.insert(
            "FFAi".to_string(),
            ApplicationStatus {
                status: AppHealth::Offline,
                last_checked: "2025-11-03T09:29:55Z".to_string(),
                version: None,
            },
        );
        apply_snapshot(&mut panel, &snapshot);

        let line = panel.slot(&Slot::App("FFAi".to_string())).unwrap();
        assert_eq!(line.text, "✓ FFAi: OFFLINE (v1.0.0)");
        assert_eq!(line.style, LineStyle::Error);
    }

    #[test]
    fn test_legacy_line_matched_by_pattern() {
        let mut panel = Panel::new();
        panel.push(PanelLine::new(LineStyle::Success, "✓ CFAi: starting..."));
        panel.push(PanelLine::new(LineStyle::Prompt, "C:\\>"));

        let mut snapshot = healthy_snapshot();
        snapshot.applications.insert(
            "CFAi".to_string(),
            ApplicationStatus {
                status: AppHealth::Online,
                last_checked: "2025-11-03T09:29:55Z".to_string(),
                version: Some("v2.1.0".to_string()),
            },
        );
        apply_snapshot(&mut panel, &snapshot);

        assert_eq!(panel.lines()[0].text, "✓ CFAi: ONLINE (v2.1.0)");
    }

    #[test]
    fn test_untracked_line_left_untouched() {
        let mut panel = Panel::new();
        panel.push(PanelLine::new(LineStyle::Success, "✓ Backup Agent: idle"));
        let before = panel.lines()[0].text.clone();

        apply_snapshot(&mut panel, &healthy_snapshot());
        assert_eq!(panel.lines()[0].text, before);
    }

    #[test]
    fn test_metrics_block_created_before_prompt() {
        let mut panel = Panel::template(&tracked());
        let mut snapshot = healthy_snapshot();
        snapshot.system_performance.cpu = 42.5;
        snapshot.system_performance.available_memory_mb = 2048.0;
        snapshot.request_stats.current_connections = 37;
        snapshot.request_stats.requests_per_second = 12.4;
        apply_snapshot(&mut panel, &snapshot);

        assert_eq!(
            panel.slot(&Slot::MetricsCpu).unwrap().text,
            "CPU Usage: 42.5% | Memory: 2048 MB Available"
        );
        assert_eq!(
            panel.slot(&Slot::MetricsRequests).unwrap().text,
            "Active Connections: 37 | Requests/sec: 12.4"
        );

        // Block sits before the closing prompt, timestamp after it
        let lines = panel.lines();
        let cpu = lines.iter().position(|l| l.slot == Some(Slot::MetricsCpu)).unwrap();
        let prompt = lines.iter().rposition(|l| l.style == LineStyle::Prompt).unwrap();
        assert!(cpu < prompt);
    }

    #[test]
    fn test_reapply_does_not_duplicate() {
        let mut panel = Panel::template(&tracked());
        let snapshot = healthy_snapshot();

        apply_snapshot(&mut panel, &snapshot);
        let len = panel.len();
        let texts: Vec<String> = panel.lines().iter().map(|l| l.text.clone()).collect();

        apply_snapshot(&mut panel, &snapshot);
        assert_eq!(panel.len(), len);
        let texts_again: Vec<String> = panel.lines().iter().map(|l| l.text.clone()).collect();
        assert_eq!(texts, texts_again);
    }

    #[test]
    fn test_timestamp_line_appended() {
        let mut panel = Panel::template(&tracked());
        let mut snapshot = healthy_snapshot();
        snapshot.timestamp = "garbled".to_string();
        apply_snapshot(&mut panel, &snapshot);

        assert_eq!(
            panel.slot(&Slot::TimestampInfo).unwrap().text,
            "Last Updated: garbled"
        );
    }

    #[test]
    fn test_missing_slots_skipped() {
        // A panel with no targets at all: apply must not panic and only
        // the upsert steps take effect.
        let mut panel = Panel::new();
        apply_snapshot(&mut panel, &healthy_snapshot());

        assert!(panel.has_slot(&Slot::MetricsCpu));
        assert!(panel.has_slot(&Slot::TimestampInfo));
        assert!(!panel.has_slot(&Slot::Uptime));
    }

    #[test]
    fn test_extract_app_name() {
        assert_eq!(extract_app_name("✓ CFAi: ONLINE (v1.0.0)"), Some("CFAi"));
        assert_eq!(extract_app_name("✓APIHub: checking..."), Some("APIHub"));
        assert_eq!(extract_app_name("✓ Server Status: ONLINE"), None);
        assert_eq!(extract_app_name("✓ Database Connection: ACTIVE"), None);
        assert_eq!(extract_app_name("no check mark here"), None);
        assert_eq!(extract_app_name("✓ : empty"), None);
        assert_eq!(extract_app_name("✓ Dangling"), None);
    }
}
