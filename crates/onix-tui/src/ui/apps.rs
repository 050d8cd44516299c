//! Applications table.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Frame;

use onix_core::App;
use onix_tui_components::{DataTable, TableCell, TableColumn, TableRow, Theme};

use crate::controls::{AppControls, ControlBoard};
use crate::state::UiState;

use super::{hint_color, status_color};

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    controls: &ControlBoard,
    theme: &Theme,
) {
    let columns = [
        TableColumn::flex("Name", 16),
        TableColumn::new("Containers", 12),
        TableColumn::new("Status", 20),
        TableColumn::flex("Actions", 20),
    ];

    let rows: Vec<TableRow> = state
        .apps
        .iter()
        .map(|app| app_row(app, controls.get(&app.id), theme))
        .collect();

    DataTable::new(&columns, &rows)
        .title(format!(" Applications ({}) ", state.apps.len()))
        .selected(state.selected)
        .empty_message("No applications yet.")
        .theme(theme.clone())
        .render(frame, area);
}

fn app_row(app: &App, controls: Option<&AppControls>, theme: &Theme) -> TableRow {
    let containers = format!("{}/{}", app.running_containers(), app.containers.len());

    TableRow::new(vec![
        TableCell::new(app.name.clone()),
        TableCell::new(containers),
        TableCell::colored(app.status.label(), status_color(app.status, theme)),
        actions_cell(controls, theme),
    ])
}

/// Glyphs of the offered actions, focused one highlighted.
fn actions_cell(controls: Option<&AppControls>, theme: &Theme) -> TableCell {
    let Some(controls) = controls else {
        return TableCell::default();
    };

    let mut cell = TableCell::default();
    for (i, control) in controls.controls().iter().enumerate() {
        let color = if control.is_enabled() {
            hint_color(control.descriptor().color, theme)
        } else {
            theme.muted
        };
        let mut style = Style::default().fg(color);
        if i == controls.focus() {
            style = style.add_modifier(Modifier::BOLD);
        }
        cell = cell.push(format!("{} ", control.icon().glyph()), style);
    }
    if controls.group().is_unimplemented() {
        cell = cell.push("(limited)", theme.muted_style());
    }
    cell
}
