//! The update cycle driver.
//!
//! Owns a snapshot source and the shared panel, and runs the periodic
//! fetch-then-apply loop. At most one cycle's apply phase executes at a
//! time: a tick or manual refresh arriving while a cycle is in flight is
//! dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

use crate::panel::{apply_snapshot, MetricsHistory, Panel};
use crate::source::{fetch_or_fallback, SnapshotSource, StatusSnapshot};

/// Drives update cycles against a shared panel.
pub struct StatsUpdater {
    source: tokio::sync::Mutex<Box<dyn SnapshotSource>>,
    panel: Arc<Mutex<Panel>>,
    history: Arc<Mutex<MetricsHistory>>,
    applications: Vec<String>,
    in_flight: AtomicBool,
    last_update: Mutex<Option<Instant>>,
}

/// Clears the in-flight flag when the cycle ends, including on unwind.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl StatsUpdater {
    /// Create an updater over the given source and shared panel state.
    ///
    /// `applications` is the tracked application set, used when a fallback
    /// snapshot has to be synthesized.
    pub fn new(
        source: Box<dyn SnapshotSource>,
        panel: Arc<Mutex<Panel>>,
        history: Arc<Mutex<MetricsHistory>>,
        applications: Vec<String>,
    ) -> Self {
        Self {
            source: tokio::sync::Mutex::new(source),
            panel,
            history,
            applications,
            in_flight: AtomicBool::new(false),
            last_update: Mutex::new(None),
        }
    }

    /// Run one fetch-then-apply cycle.
    ///
    /// A cycle already in flight makes this a no-op: the call returns
    /// immediately having touched nothing. Fetch failures surface as a
    /// fallback snapshot; any other error is logged and swallowed, and the
    /// in-flight flag is released either way.
    pub async fn run_update_cycle(&self) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("update already in flight, dropping this cycle");
            return;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let snapshot = {
            let mut source = self.source.lock().await;
            fetch_or_fallback(source.as_mut(), &self.applications).await
        };

        match self.apply(&snapshot) {
            Ok(()) => {
                *self.last_update.lock().unwrap() = Some(Instant::now());
                debug!(server = %snapshot.server_name, "applied snapshot");
            }
            Err(e) => error!(error = %e, "update cycle failed"),
        }
    }

    fn apply(&self, snapshot: &StatusSnapshot) -> Result<()> {
        let mut panel = self
            .panel
            .lock()
            .map_err(|_| anyhow!("panel lock poisoned"))?;
        let mut history = self
            .history
            .lock()
            .map_err(|_| anyhow!("history lock poisoned"))?;

        apply_snapshot(&mut panel, snapshot);
        history.record(snapshot);
        if let Some(trend) = history.trend_line() {
            panel.upsert_trend(trend);
        }
        Ok(())
    }

    /// Whether a cycle is currently in flight.
    pub fn is_updating(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Completion time of the most recent successful cycle.
    pub fn last_update(&self) -> Option<Instant> {
        *self.last_update.lock().unwrap()
    }

    /// Description of the underlying source, for the status bar.
    ///
    /// Uses a non-blocking lock; yields `None` during a fetch.
    pub fn source_description(&self) -> Option<String> {
        self.source
            .try_lock()
            .ok()
            .map(|s| s.description().to_string())
    }

    /// Run one cycle immediately, then keep cycling on a fixed interval.
    ///
    /// Returns a handle that triggers manual refreshes and stops the loop.
    /// Dropping the handle also ends the loop.
    pub fn start(self: Arc<Self>, interval: Duration) -> UpdaterHandle {
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);
        let updater = self;

        let task = tokio::spawn(async move {
            updater.run_update_cycle().await;

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the initial cycle above
            // already covered it.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => updater.run_update_cycle().await,
                    trigger = refresh_rx.recv() => match trigger {
                        Some(()) => updater.run_update_cycle().await,
                        None => break,
                    },
                }
            }
        });

        UpdaterHandle { task, refresh_tx }
    }
}

impl std::fmt::Debug for StatsUpdater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsUpdater")
            .field("applications", &self.applications)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// Handle to a running update loop.
#[derive(Debug)]
pub struct UpdaterHandle {
    task: JoinHandle<()>,
    refresh_tx: mpsc::Sender<()>,
}

impl UpdaterHandle {
    /// Trigger a manual refresh, identical to one scheduled cycle.
    ///
    /// A refresh requested while one is already queued is dropped.
    pub fn refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Stop the update loop. The loop does not restart; create a new
    /// updater to resume.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the loop has terminated.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }
}
