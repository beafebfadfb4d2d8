//! # hubwatch
//!
//! A terminal status panel for CFAi Hub server statistics.
//!
//! The hub exports a statistics document (JSON) describing server health,
//! uptime, IIS request counters and per-application status. This crate
//! polls that document and rewrites a terminal-styled panel in place, the
//! way the original hub console displayed it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│  panel   │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │ (slots)  │    │(render) │    │          │ │
//! │  └────┬────┘    └────▲─────┘    └─────────┘    └──────────┘ │
//! │       │              │                                       │
//! │       ▼         ┌────┴────┐                                  │
//! │  ┌─────────┐    │ updater │◀── HttpSource | FileSource |     │
//! │  │ settings│    │ (cycle) │    ChannelSource                 │
//! │  └─────────┘    └─────────┘                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: snapshot acquisition ([`SnapshotSource`] trait) with
//!   HTTP, file and channel implementations, the wire types, and local
//!   fallback synthesis for when the document is unavailable
//! - **[`panel`]**: the panel model - slot-addressed styled lines, the
//!   pre-rendered template, snapshot application, and metric history for
//!   trend sparklines
//! - **[`updater`]**: the update cycle driver - re-entrancy-guarded
//!   fetch-then-apply on a fixed interval, with manual refresh and an
//!   explicit stop
//! - **[`app`]**, **[`events`]**, **[`ui`]**: TUI shell - application
//!   state, key handling, and ratatui rendering with theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the hub's statistics endpoint
//! hubwatch --endpoint http://hub-prod-01/data/server-stats.json
//!
//! # Poll a local statistics file
//! hubwatch --file data/server-stats.json
//! ```
//!
//! ### As a library with a pushed snapshot
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! use hubwatch::panel::{MetricsHistory, Panel};
//! use hubwatch::source::{ChannelSource, StatusSnapshot, DEFAULT_APPLICATIONS};
//! use hubwatch::updater::StatsUpdater;
//!
//! # tokio_test::block_on(async {
//! let apps: Vec<String> = DEFAULT_APPLICATIONS.iter().map(|s| s.to_string()).collect();
//! let (tx, source) = ChannelSource::create(StatusSnapshot::fallback(&apps), "embedded");
//!
//! let panel = Arc::new(Mutex::new(Panel::template(&apps)));
//! let history = Arc::new(Mutex::new(MetricsHistory::new()));
//! let updater = Arc::new(StatsUpdater::new(Box::new(source), panel, history, apps));
//!
//! let handle = updater.start(Duration::from_secs(30));
//! // ... render, push snapshots through tx ...
//! handle.stop();
//! # });
//! ```

pub mod app;
pub mod events;
pub mod panel;
pub mod settings;
pub mod source;
pub mod ui;
pub mod updater;

// Re-export main types for convenience
pub use app::App;
pub use panel::{apply_snapshot, extract_app_name, LineStyle, MetricsHistory, Panel, PanelLine, Slot};
pub use settings::Settings;
pub use source::{
    AppHealth, ApplicationStatus, ChannelSource, FileSource, HttpSource, OverallHealth,
    SnapshotSource, SourceError, StatusSnapshot,
};
pub use ui::Theme;
pub use updater::{StatsUpdater, UpdaterHandle};
