//! The status panel model.
//!
//! The panel is the terminal-styled block of lines the updater rewrites in
//! place. Lines that the updater targets carry a stable [`Slot`] identifier;
//! lookup never depends on the rendered text, so content and addressing
//! stay decoupled.

mod apply;
mod history;
mod template;

pub use apply::{apply_snapshot, extract_app_name};
pub use history::MetricsHistory;

/// Visual style of a panel line, mirroring the terminal line classes of the
/// original hub console template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Info,
    Success,
    Error,
    Warning,
    Prompt,
}

/// Stable identifier for a line the updater rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// The system uptime display.
    Uptime,
    /// The overall server status line.
    ServerStatus,
    /// The database connection line.
    Database,
    /// The authentication service line.
    AuthService,
    /// A per-application status line.
    App(String),
    /// CPU / memory row of the performance metrics block.
    MetricsCpu,
    /// Connections / requests row of the performance metrics block.
    MetricsRequests,
    /// Sparkline trend row of the performance metrics block.
    MetricsTrend,
    /// The "Last Updated" line.
    TimestampInfo,
}

/// One line of the panel.
#[derive(Debug, Clone)]
pub struct PanelLine {
    /// Present on lines the updater targets; decorative lines have none.
    pub slot: Option<Slot>,
    pub style: LineStyle,
    pub text: String,
}

impl PanelLine {
    /// A decorative line with no slot.
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            slot: None,
            style,
            text: text.into(),
        }
    }

    /// A line addressable through a slot.
    pub fn with_slot(slot: Slot, style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            slot: Some(slot),
            style,
            text: text.into(),
        }
    }
}

/// The status panel: an ordered list of styled lines.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    lines: Vec<PanelLine>,
}

impl Panel {
    /// An empty panel.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[PanelLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [PanelLine] {
        &mut self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: PanelLine) {
        self.lines.push(line);
    }

    /// Find the line carrying the given slot.
    pub fn slot(&self, slot: &Slot) -> Option<&PanelLine> {
        self.lines.iter().find(|l| l.slot.as_ref() == Some(slot))
    }

    /// Mutable access to the line carrying the given slot.
    pub fn slot_mut(&mut self, slot: &Slot) -> Option<&mut PanelLine> {
        self.lines.iter_mut().find(|l| l.slot.as_ref() == Some(slot))
    }

    pub fn has_slot(&self, slot: &Slot) -> bool {
        self.slot(slot).is_some()
    }

    /// Insert lines immediately before the last prompt-styled line.
    ///
    /// The closing prompt is the structural anchor of the panel; when no
    /// prompt exists the lines are appended at the end.
    pub fn insert_before_last_prompt(&mut self, lines: Vec<PanelLine>) {
        let index = self
            .lines
            .iter()
            .rposition(|l| l.style == LineStyle::Prompt)
            .unwrap_or(self.lines.len());
        self.lines.splice(index..index, lines);
    }

    /// Create or rewrite the trend row of the metrics block.
    ///
    /// Inserted directly after the requests row when the block exists,
    /// otherwise before the closing prompt.
    pub fn upsert_trend(&mut self, text: String) {
        if let Some(line) = self.slot_mut(&Slot::MetricsTrend) {
            line.text = text;
            return;
        }

        let line = PanelLine::with_slot(Slot::MetricsTrend, LineStyle::Info, text);
        if let Some(index) = self
            .lines
            .iter()
            .position(|l| l.slot == Some(Slot::MetricsRequests))
        {
            self.lines.insert(index + 1, line);
        } else {
            self.insert_before_last_prompt(vec![line]);
        }
    }

    /// Create or rewrite the "Last Updated" line, appended when absent.
    pub fn upsert_timestamp(&mut self, text: String) {
        if let Some(line) = self.slot_mut(&Slot::TimestampInfo) {
            line.text = text;
            return;
        }
        self.lines.push(PanelLine::with_slot(
            Slot::TimestampInfo,
            LineStyle::Info,
            text,
        ));
    }
}
