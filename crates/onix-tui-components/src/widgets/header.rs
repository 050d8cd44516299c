//! Header widget: title, connection status, breadcrumb and stats.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::Theme;

/// Status indicator for the header.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    pub label: String,
    pub color: Color,
}

impl StatusIndicator {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(label, Color::Green)
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self::new(label, Color::Yellow)
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::new(label, Color::Red)
    }
}

/// A stat to display in the header.
#[derive(Debug, Clone)]
pub struct HeaderStat {
    pub label: String,
    pub value: String,
    pub color: Color,
}

impl HeaderStat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: Color::Cyan,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Header widget.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    /// Application title.
    title: &'a str,
    /// Connection status.
    status: Option<StatusIndicator>,
    /// Path of the current view, outermost first.
    breadcrumb: Vec<String>,
    /// Stats shown on the right side.
    stats: Vec<HeaderStat>,
    /// Theme for styling.
    theme: Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            status: None,
            breadcrumb: Vec::new(),
            stats: Vec::new(),
            theme: Theme::default(),
        }
    }

    /// Set the status indicator.
    pub fn status(mut self, status: StatusIndicator) -> Self {
        self.status = Some(status);
        self
    }

    /// Append a breadcrumb segment.
    pub fn crumb(mut self, segment: impl Into<String>) -> Self {
        self.breadcrumb.push(segment.into());
        self
    }

    /// Add a stat to display.
    pub fn stat(mut self, stat: HeaderStat) -> Self {
        self.stats.push(stat);
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the header.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(30), Constraint::Length(46)]).areas(area);

        let mut title_spans = vec![Span::raw(format!(" {} ", self.title))];
        if let Some(status) = &self.status {
            title_spans.push(Span::styled(
                format!("[{}]", status.label),
                Style::default().fg(status.color),
            ));
            title_spans.push(Span::raw(" "));
        }

        let last = self.breadcrumb.len().saturating_sub(1);
        let mut crumbs = vec![Span::raw(" ")];
        for (i, segment) in self.breadcrumb.iter().enumerate() {
            if i > 0 {
                crumbs.push(Span::styled(" > ", self.theme.muted_style()));
            }
            let style = if i == last {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            crumbs.push(Span::styled(segment.clone(), style));
        }

        let path = Paragraph::new(Line::from(crumbs))
            .block(Block::default().title(title_spans).borders(Borders::ALL));
        frame.render_widget(path, left);

        let mut stat_spans = vec![Span::raw(" ")];
        for (i, stat) in self.stats.iter().enumerate() {
            if i > 0 {
                stat_spans.push(Span::raw(" | "));
            }
            stat_spans.push(Span::raw(format!("{}: ", stat.label)));
            stat_spans.push(Span::styled(
                stat.value.clone(),
                Style::default().fg(stat.color),
            ));
        }

        let stats = Paragraph::new(Line::from(stat_spans))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(stats, right);
    }
}
