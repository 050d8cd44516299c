//! Dialog widgets for confirmations and read-only text.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;
use crate::utils::wrap_text;

/// Create a centered rectangle within the given area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// A confirmation dialog answered with `y` or `n`.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<'a> {
    /// Dialog title.
    title: &'a str,
    /// Main message.
    message: &'a str,
    /// Label of the accepting choice.
    confirm_label: &'a str,
    /// Label of the dismissing choice.
    cancel_label: &'a str,
    /// Width of the dialog.
    width: u16,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> ConfirmDialog<'a> {
    /// Create a new confirmation dialog.
    pub fn new(title: &'a str, message: &'a str) -> Self {
        Self {
            title,
            message,
            confirm_label: "Yes",
            cancel_label: "No",
            width: 50,
            theme: Theme::default(),
        }
    }

    /// Set the labels of both choices.
    pub fn labels(mut self, confirm: &'a str, cancel: &'a str) -> Self {
        self.confirm_label = confirm;
        self.cancel_label = cancel;
        self
    }

    /// Set the dialog width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the dialog.
    pub fn render(self, frame: &mut Frame) {
        let inner_width = self.width.saturating_sub(4) as usize;
        let message = wrap_text(self.message, inner_width);
        let height = message.len() as u16 + 6;
        let area = centered_rect(self.width, height, frame.area());

        frame.render_widget(Clear, area);

        let mut lines = vec![Line::from("")];
        lines.extend(message.into_iter().map(Line::from));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                "[y] ",
                self.theme.error_style().add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.confirm_label),
            Span::raw("    "),
            Span::styled("[n] ", self.theme.bold()),
            Span::raw(self.cancel_label),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border()),
            )
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}

/// A scrollable popup showing preformatted text.
#[derive(Debug, Clone)]
pub struct TextPopup<'a> {
    title: &'a str,
    text: &'a str,
    scroll: u16,
    theme: Theme,
}

impl<'a> TextPopup<'a> {
    pub fn new(title: &'a str, text: &'a str) -> Self {
        Self {
            title,
            text,
            scroll: 0,
            theme: Theme::default(),
        }
    }

    /// Set the number of lines scrolled past.
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the popup over most of the frame.
    pub fn render(self, frame: &mut Frame) {
        let full = frame.area();
        let area = centered_rect(
            full.width.saturating_sub(8).max(20),
            full.height.saturating_sub(4).max(6),
            full,
        );

        frame.render_widget(Clear, area);

        let lines: Vec<Line> = self.text.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .title_bottom(Line::from(Span::styled(
                        " j/k: scroll | Esc: close ",
                        self.theme.muted_style(),
                    )))
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border()),
            )
            .style(Style::default())
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, area);
    }
}
