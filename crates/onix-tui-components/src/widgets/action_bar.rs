//! Row of action buttons.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;

/// One button of an [`ActionBar`].
#[derive(Debug, Clone)]
pub struct ActionButton<'a> {
    pub icon: &'a str,
    pub label: &'a str,
    pub color: Color,
    pub enabled: bool,
    pub focused: bool,
}

impl<'a> ActionButton<'a> {
    pub fn new(icon: &'a str, label: &'a str, color: Color) -> Self {
        Self {
            icon,
            label,
            color,
            enabled: true,
            focused: false,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn style(&self, theme: &Theme) -> Style {
        let base = if self.enabled {
            Style::default().fg(self.color)
        } else {
            theme.muted_style()
        };
        if self.focused {
            base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            base
        }
    }
}

/// Horizontal bar of buttons, or a placeholder when there are none.
#[derive(Debug, Clone)]
pub struct ActionBar<'a> {
    buttons: Vec<ActionButton<'a>>,
    placeholder: &'a str,
    title: &'a str,
    theme: Theme,
}

impl<'a> ActionBar<'a> {
    pub fn new(buttons: Vec<ActionButton<'a>>) -> Self {
        Self {
            buttons,
            placeholder: "No action available.",
            title: " Actions ",
            theme: Theme::default(),
        }
    }

    /// Text shown when the bar has no button.
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Spans of the bar's content, without the surrounding block.
    pub fn line(&self) -> Line<'a> {
        if self.buttons.is_empty() {
            return Line::from(Span::styled(
                format!(" {}", self.placeholder),
                self.theme.warning_style(),
            ));
        }

        let mut spans = vec![Span::raw(" ")];
        for button in &self.buttons {
            spans.push(Span::styled(
                format!("[{} {}]", button.icon, button.label),
                button.style(&self.theme),
            ));
            spans.push(Span::raw("  "));
        }
        Line::from(spans)
    }

    /// Render the bar.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.line()).block(
            Block::default()
                .title(self.title)
                .borders(Borders::ALL)
                .border_style(self.theme.unfocused_border()),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_buttons_are_bracketed() {
        let bar = ActionBar::new(vec![
            ActionButton::new("▶", "Start", Color::Blue),
            ActionButton::new("✖", "Remove containers", Color::Red).enabled(false),
        ]);
        assert_eq!(text(&bar.line()), " [▶ Start]  [✖ Remove containers]  ");
    }

    #[test]
    fn test_empty_bar_shows_placeholder() {
        let bar = ActionBar::new(vec![]).placeholder("Unsupported status");
        assert_eq!(text(&bar.line()), " Unsupported status");
    }

    #[test]
    fn test_disabled_button_is_muted() {
        let theme = Theme::default();
        let button = ActionButton::new("■", "Stop", Color::Yellow).enabled(false);
        assert_eq!(button.style(&theme).fg, Some(theme.muted));
    }
}
