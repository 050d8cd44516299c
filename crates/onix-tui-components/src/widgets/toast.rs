//! Stack of transient notifications drawn over the top-right corner.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::utils::{truncate, wrap_text};

/// Width of a toast, borders included.
const TOAST_WIDTH: u16 = 44;

/// Description lines kept per toast.
const MAX_LINES: usize = 3;

/// Content of one toast.
#[derive(Debug, Clone)]
pub struct ToastView<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub color: Color,
}

/// Renders toasts newest first, stacked downwards.
#[derive(Debug, Clone)]
pub struct ToastStack<'a> {
    toasts: Vec<ToastView<'a>>,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: Vec<ToastView<'a>>) -> Self {
        Self { toasts }
    }

    pub fn render(self, frame: &mut Frame) {
        let area = frame.area();
        let width = TOAST_WIDTH.min(area.width);
        let inner = width.saturating_sub(2) as usize;
        let mut y = area.y + 1;

        for toast in self.toasts.iter().rev() {
            let mut lines = wrap_text(toast.description, inner);
            if lines.len() > MAX_LINES {
                lines.truncate(MAX_LINES);
                if let Some(last) = lines.last_mut() {
                    *last = truncate(&format!("{last}..."), inner);
                }
            }

            let height = lines.len() as u16 + 2;
            if y + height > area.bottom() {
                break;
            }

            let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, height);
            frame.render_widget(Clear, rect);

            let paragraph = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
                .block(
                    Block::default()
                        .title(format!(" {} ", truncate(toast.title, inner.saturating_sub(2))))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(toast.color)),
                );
            frame.render_widget(paragraph, rect);

            y += height;
        }
    }
}
