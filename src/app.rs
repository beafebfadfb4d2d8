//! Application state and interaction logic.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::panel::{LineStyle, Panel, PanelLine, Slot};
use crate::ui::Theme;
use crate::updater::{StatsUpdater, UpdaterHandle};

/// How long a transient status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Main application state.
///
/// Owns the updater handle; quitting stops the update loop before the
/// terminal is restored.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub theme: Theme,

    panel: Arc<Mutex<Panel>>,
    updater: Arc<StatsUpdater>,
    handle: UpdaterHandle,
    source_description: String,
    status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        panel: Arc<Mutex<Panel>>,
        updater: Arc<StatsUpdater>,
        handle: UpdaterHandle,
        source_description: String,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            show_help: false,
            theme,
            panel,
            updater,
            handle,
            source_description,
            status_message: None,
        }
    }

    /// Stop the update loop and leave the main loop.
    pub fn quit(&mut self) {
        self.handle.stop();
        self.running = false;
    }

    /// Trigger a manual refresh cycle.
    pub fn request_refresh(&mut self) {
        self.handle.refresh();
        self.set_status_message("Refresh requested");
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// The current transient message, if it hasn't expired.
    pub fn status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((message, since)) if since.elapsed() < STATUS_MESSAGE_TTL => Some(message),
            _ => None,
        }
    }

    /// Snapshot of the panel lines for rendering.
    pub fn panel_lines(&self) -> Vec<PanelLine> {
        self.panel
            .lock()
            .map(|panel| panel.lines().to_vec())
            .unwrap_or_default()
    }

    /// Style of the overall server-status line, for the header glyph.
    pub fn health_style(&self) -> LineStyle {
        self.panel
            .lock()
            .ok()
            .and_then(|panel| panel.slot(&Slot::ServerStatus).map(|l| l.style))
            .unwrap_or(LineStyle::Info)
    }

    /// Whether an update cycle is in flight right now.
    pub fn is_updating(&self) -> bool {
        self.updater.is_updating()
    }

    /// Time since the last completed update cycle.
    pub fn last_update_age(&self) -> Option<Duration> {
        self.updater.last_update().map(|at| at.elapsed())
    }

    pub fn source_description(&self) -> &str {
        &self.source_description
    }
}
