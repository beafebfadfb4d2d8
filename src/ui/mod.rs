//! Terminal rendering for the status panel.
//!
//! The panel body is rendered line-by-line from the shared [`Panel`] model;
//! header and status bar carry the source description, update age, and a
//! live indicator while a cycle is in flight.
//!
//! [`Panel`]: crate::panel::Panel

pub mod theme;

pub use theme::Theme;

use std::time::Duration;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the full frame: header, panel body, status bar, help overlay.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Min(8),    // Panel body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_panel(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame, app, area);
    }
}

/// Render the header bar: health glyph, title, source description.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let glyph_style = app.theme.line_style(app.health_style());

    let line = Line::from(vec![
        Span::styled(" ● ", glyph_style),
        Span::styled("CFAI HUB ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.source_description().to_string()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the panel body inside a bordered block.
fn render_panel(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .panel_lines()
        .into_iter()
        .map(|panel_line| {
            let style = app.theme.line_style(panel_line.style);
            Line::from(Span::styled(panel_line.text, style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Server Status ");

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the status bar: key hints, update age, in-flight indicator.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " q quit · r refresh · ? help ",
        Style::default().add_modifier(Modifier::DIM),
    )];

    if app.is_updating() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            "updating…",
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    } else if let Some(age) = app.last_update_age() {
        spans.push(Span::raw("│ "));
        spans.push(Span::raw(format!("updated {} ", format_age(age))));
    }

    if let Some(message) = app.status_message() {
        spans.push(Span::raw("│ "));
        spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.highlight),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help overlay.
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_area = centered_rect(40, 9, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  q / Esc   quit"),
        Line::from("  r         refresh now"),
        Line::from("  ?         toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(" Help ");

    frame.render_widget(Clear, help_area);
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}

/// A centered rect of the given size, clamped to the available area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Format an update age for the status bar.
fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 2 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}
