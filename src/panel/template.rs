//! The pre-rendered panel template.
//!
//! This is the consumer side of the panel contract: the template provides
//! the slotted lines the updater rewrites. Placeholder text is shown until
//! the first snapshot lands.

use super::{LineStyle, Panel, PanelLine, Slot};

impl Panel {
    /// Build the hub console template for the given tracked applications.
    pub fn template(applications: &[String]) -> Self {
        let mut panel = Panel::new();

        panel.push(PanelLine::new(
            LineStyle::Info,
            "CFAi Hub Server Console v2.0",
        ));
        panel.push(PanelLine::new(LineStyle::Info, ""));
        panel.push(PanelLine::with_slot(
            Slot::Uptime,
            LineStyle::Info,
            "System Uptime: calculating...",
        ));
        panel.push(PanelLine::with_slot(
            Slot::ServerStatus,
            LineStyle::Success,
            "✓ Server Status: ONLINE",
        ));
        panel.push(PanelLine::with_slot(
            Slot::Database,
            LineStyle::Success,
            "✓ Database Connection: ACTIVE",
        ));
        panel.push(PanelLine::with_slot(
            Slot::AuthService,
            LineStyle::Success,
            "✓ Authentication Service: RUNNING",
        ));
        panel.push(PanelLine::new(LineStyle::Info, ""));
        panel.push(PanelLine::new(LineStyle::Info, "Application Services:"));

        for name in applications {
            panel.push(PanelLine::with_slot(
                Slot::App(name.clone()),
                LineStyle::Success,
                format!("✓ {}: checking...", name),
            ));
        }

        panel.push(PanelLine::new(LineStyle::Info, ""));
        panel.push(PanelLine::new(LineStyle::Prompt, "C:\\CFAi> _"));

        panel
    }
}
