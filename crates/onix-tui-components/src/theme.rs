//! Theme and style definitions.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the Onix dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary accent color (highlights, focused elements)
    pub accent: Color,
    /// Success color (running, connected)
    pub success: Color,
    /// Warning color (transient or degraded states)
    pub warning: Color,
    /// Error color (failed, disconnected)
    pub error: Color,
    /// Informational color (neutral notices)
    pub info: Color,
    /// Muted color (secondary info, disabled controls)
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Style for focused/active borders.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Style for unfocused borders.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for success text.
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Style for warning text.
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Style for error text.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for bold text.
    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }
}
