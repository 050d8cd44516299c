//! Footer widget: a status message followed by key hints.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme::Theme;

/// Footer widget displaying a status and key help.
#[derive(Debug, Clone)]
pub struct Footer<'a> {
    /// Status message with its color.
    status: Option<(&'a str, Color)>,
    /// `(key, action)` pairs.
    hints: Vec<(&'a str, &'a str)>,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> Footer<'a> {
    pub fn new() -> Self {
        Self {
            status: None,
            hints: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Set the status message.
    pub fn status(mut self, text: &'a str, color: Color) -> Self {
        self.status = Some((text, color));
        self
    }

    /// Add a key hint.
    pub fn hint(mut self, key: &'a str, action: &'a str) -> Self {
        self.hints.push((key, action));
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the footer.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();

        if let Some((text, color)) = self.status {
            spans.push(Span::styled(format!(" {} ", text), Style::default().fg(color)));
            spans.push(Span::raw("|"));
        }

        let hints = self
            .hints
            .iter()
            .map(|(key, action)| format!("{}: {}", key, action))
            .collect::<Vec<_>>()
            .join(" | ");
        spans.push(Span::styled(format!(" {} ", hints), self.theme.muted_style()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for Footer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
