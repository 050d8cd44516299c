//! Table widget for displaying data in rows and columns.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::theme::Theme;

/// A column definition for the table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Column header text.
    pub header: String,
    /// Column width constraint.
    pub width: Constraint,
}

impl TableColumn {
    /// Create a new column with a fixed width.
    pub fn new(header: impl Into<String>, width: u16) -> Self {
        Self {
            header: header.into(),
            width: Constraint::Length(width),
        }
    }

    /// Create a column with minimum width (flexible).
    pub fn flex(header: impl Into<String>, min_width: u16) -> Self {
        Self {
            header: header.into(),
            width: Constraint::Min(min_width),
        }
    }
}

/// A cell made of one or more styled fragments.
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    pub parts: Vec<(String, Style)>,
}

impl TableCell {
    /// Create a new unstyled cell.
    pub fn new(content: impl Into<String>) -> Self {
        Self::styled(content, Style::default())
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            parts: vec![(content.into(), style)],
        }
    }

    /// Create a cell with a foreground color.
    pub fn colored(content: impl Into<String>, color: Color) -> Self {
        Self::styled(content, Style::default().fg(color))
    }

    /// Append a fragment.
    pub fn push(mut self, content: impl Into<String>, style: Style) -> Self {
        self.parts.push((content.into(), style));
        self
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::colored(content, Color::Green)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::colored(content, Color::Yellow)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::colored(content, Color::Red)
    }

    pub fn muted(content: impl Into<String>) -> Self {
        Self::colored(content, Color::DarkGray)
    }

    /// Cyan cell, for identifiers and values.
    pub fn cyan(content: impl Into<String>) -> Self {
        Self::colored(content, Color::Cyan)
    }

    /// Plain text of the cell, fragments concatenated.
    pub fn text(&self) -> String {
        self.parts.iter().map(|(s, _)| s.as_str()).collect()
    }

    fn to_cell(&self) -> Cell<'static> {
        let spans: Vec<Span<'static>> = self
            .parts
            .iter()
            .map(|(s, style)| Span::styled(s.clone(), *style))
            .collect();
        Cell::from(Line::from(spans))
    }
}

/// A row in the table.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// Cells in this row.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

/// Table widget for displaying structured data.
#[derive(Debug)]
pub struct DataTable<'a> {
    title: Option<String>,
    columns: &'a [TableColumn],
    rows: &'a [TableRow],
    selected: Option<usize>,
    focused: bool,
    /// Shown instead of the table when there are no rows.
    empty_message: &'a str,
    theme: Theme,
}

impl<'a> DataTable<'a> {
    /// Create a new table with columns and rows.
    pub fn new(columns: &'a [TableColumn], rows: &'a [TableRow]) -> Self {
        Self {
            title: None,
            columns,
            rows,
            selected: None,
            focused: true,
            empty_message: "Nothing to show.",
            theme: Theme::default(),
        }
    }

    /// Set the table title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the selected row index.
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = Some(index);
        self
    }

    /// Set whether the table has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the message shown when there are no rows.
    pub fn empty_message(mut self, message: &'a str) -> Self {
        self.empty_message = message;
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render the table.
    pub fn render(self, frame: &mut Frame, area: Rect) {
        let title = self
            .title
            .unwrap_or_else(|| format!(" {} items ", self.rows.len()));
        let border = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border);

        if self.rows.is_empty() {
            let empty = Paragraph::new(Span::styled(
                format!(" {}", self.empty_message),
                self.theme.muted_style(),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            self.columns
                .iter()
                .map(|c| Cell::from(c.header.clone()))
                .collect::<Vec<_>>(),
        )
        .style(self.theme.bold())
        .height(1);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| Row::new(row.cells.iter().map(TableCell::to_cell).collect::<Vec<_>>()))
            .collect();

        let widths: Vec<Constraint> = self.columns.iter().map(|c| c.width).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_symbol("▸ ")
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = TableState::default();
        state.select(self.selected.map(|i| i.min(self.rows.len() - 1)));

        frame.render_stateful_widget(table, area, &mut state);
    }
}
