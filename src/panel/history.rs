//! Historical metric tracking for trend sparklines.

use std::collections::VecDeque;

use crate::source::StatusSnapshot;

/// Maximum number of samples to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bounded history of CPU load and request rate, one sample per applied
/// snapshot, rendered as a sparkline row in the metrics block.
#[derive(Debug, Clone, Default)]
pub struct MetricsHistory {
    cpu: VecDeque<f64>,
    requests: VecDeque<f64>,
}

impl MetricsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample from a snapshot.
    pub fn record(&mut self, snapshot: &StatusSnapshot) {
        self.cpu.push_back(snapshot.system_performance.cpu);
        if self.cpu.len() > MAX_HISTORY_SIZE {
            self.cpu.pop_front();
        }

        self.requests
            .push_back(snapshot.request_stats.requests_per_second);
        if self.requests.len() > MAX_HISTORY_SIZE {
            self.requests.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu.is_empty()
    }

    /// The trend row text, or `None` until at least two samples exist.
    pub fn trend_line(&self) -> Option<String> {
        if self.len() < 2 {
            return None;
        }
        Some(format!(
            "CPU Trend: {} | Req/s Trend: {}",
            sparkline(&self.cpu),
            sparkline(&self.requests)
        ))
    }
}

/// Render values as a sparkline, scaled to the window maximum.
fn sparkline(values: &VecDeque<f64>) -> String {
    let max = values.iter().cloned().fold(0.0_f64, f64::max);

    values
        .iter()
        .map(|&v| {
            if max <= 0.0 {
                SPARKLINE_CHARS[0]
            } else {
                let level = ((v / max) * 7.0).round() as usize;
                SPARKLINE_CHARS[level.min(7)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(cpu: f64, rps: f64) -> StatusSnapshot {
        let mut snapshot = StatusSnapshot::fallback(&[]);
        snapshot.system_performance.cpu = cpu;
        snapshot.request_stats.requests_per_second = rps;
        snapshot
    }

    #[test]
    fn test_no_trend_until_two_samples() {
        let mut history = MetricsHistory::new();
        assert!(history.trend_line().is_none());

        history.record(&snapshot_with(50.0, 5.0));
        assert!(history.trend_line().is_none());

        history.record(&snapshot_with(100.0, 10.0));
        assert!(history.trend_line().is_some());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = MetricsHistory::new();
        for i in 0..(MAX_HISTORY_SIZE + 10) {
            history.record(&snapshot_with(i as f64, 1.0));
        }
        assert_eq!(history.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_sparkline_scaling() {
        let mut history = MetricsHistory::new();
        history.record(&snapshot_with(0.0, 0.0));
        history.record(&snapshot_with(100.0, 0.0));

        let line = history.trend_line().unwrap();
        // Lowest and highest levels for the two CPU samples
        assert!(line.starts_with("CPU Trend: ▁█"));
        // All-zero request rate stays at the floor
        assert!(line.ends_with("Req/s Trend: ▁▁"));
    }
}
