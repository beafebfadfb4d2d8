//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::panel::LineStyle;

/// Color and style theme for the panel.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color for informational lines.
    pub info: Color,
    /// Color for success-styled lines.
    pub success: Color,
    /// Color for error-styled lines.
    pub error: Color,
    /// Color for warning-styled lines.
    pub warning: Color,
    /// Color for the console prompt line.
    pub prompt: Color,
    /// Accent color for highlights.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the header bar.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            info: Color::Gray,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            prompt: Color::Cyan,
            highlight: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            info: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            prompt: Color::Blue,
            highlight: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a theme by name: "dark", "light", anything else auto-detects.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::auto_detect(),
        }
    }

    /// Style for a panel line class.
    pub fn line_style(&self, style: LineStyle) -> Style {
        match style {
            LineStyle::Info => Style::default().fg(self.info),
            LineStyle::Success => Style::default().fg(self.success),
            LineStyle::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            LineStyle::Warning => Style::default()
                .fg(self.warning)
                .add_modifier(Modifier::BOLD),
            LineStyle::Prompt => Style::default().fg(self.prompt),
        }
    }
}
