//! Detail view of one application.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use onix_core::{AppContainer, AppId, ContainerStatus};
use onix_tui_components::{
    ActionBar, ActionButton, DataTable, TableCell, TableColumn, TableRow, Theme,
};

use crate::controls::{AppControls, ControlBoard};
use crate::state::UiState;

use super::hint_color;

const UNSUPPORTED_STATUS: &str = "Actions for this status are not supported yet";

pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    id: &AppId,
    controls: &ControlBoard,
    theme: &Theme,
) {
    let app = match state.app(id) {
        Ok(app) => app,
        Err(e) => {
            let message = Paragraph::new(Span::styled(format!(" {e}"), theme.error_style()))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        }
    };

    let [actions_area, containers_area, details_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(app.containers.len().max(1) as u16 + 3),
        Constraint::Fill(1),
    ])
    .areas(area);

    let app_controls = controls.get(id);
    let title = match app_controls {
        Some(c) if c.group().is_unimplemented() => format!(
            " {} | {} | {} ",
            app.name,
            app.status.label(),
            UNSUPPORTED_STATUS
        ),
        _ => format!(" {} | {} ", app.name, app.status.label()),
    };
    let buttons = app_controls
        .map(|c| action_buttons(c, theme))
        .unwrap_or_default();
    ActionBar::new(buttons)
        .title(&title)
        .placeholder("Waiting for the next refresh.")
        .theme(theme.clone())
        .render(frame, actions_area);

    let columns = [
        TableColumn::flex("Container", 14),
        TableColumn::flex("Image", 20),
        TableColumn::new("Status", 14),
        TableColumn::new("Ports", 24),
    ];
    let rows: Vec<TableRow> = app
        .containers
        .iter()
        .map(|c| container_row(c, theme))
        .collect();
    DataTable::new(&columns, &rows)
        .title(" Containers ")
        .focused(false)
        .empty_message("This application declares no containers.")
        .theme(theme.clone())
        .render(frame, containers_area);

    let details = Paragraph::new(detail_lines(&app.containers, theme))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Volumes & environment ")
                .border_style(theme.unfocused_border()),
        );
    frame.render_widget(details, details_area);
}

fn action_buttons(controls: &AppControls, theme: &Theme) -> Vec<ActionButton<'static>> {
    controls
        .controls()
        .iter()
        .enumerate()
        .map(|(i, control)| {
            let descriptor = control.descriptor();
            ActionButton::new(
                control.icon().glyph(),
                descriptor.label,
                hint_color(descriptor.color, theme),
            )
            .enabled(control.is_enabled())
            .focused(i == controls.focus())
        })
        .collect()
}

fn container_row(container: &AppContainer, theme: &Theme) -> TableRow {
    let status = match container.status() {
        Some(ContainerStatus::Running) => TableCell::success(container.status_label()),
        Some(ContainerStatus::Dead) => TableCell::error(container.status_label()),
        Some(s) if s.is_transient() => TableCell::warning(container.status_label()),
        Some(_) => TableCell::new(container.status_label()),
        None => TableCell::muted(container.status_label()),
    };
    let ports = container
        .port_bindings
        .iter()
        .map(|b| format!("{}:{}", b.host_port, b.container_port))
        .collect::<Vec<_>>()
        .join(", ");

    TableRow::new(vec![
        TableCell::cyan(container.name.clone()),
        TableCell::styled(container.image.clone(), theme.muted_style()),
        status,
        TableCell::new(ports),
    ])
}

fn detail_lines<'a>(containers: &'a [AppContainer], theme: &Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for container in containers {
        lines.push(Line::from(Span::styled(container.name.as_str(), theme.bold())));

        if !container.depends_on.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("  depends on ", theme.muted_style()),
                Span::raw(container.depends_on.join(", ")),
            ]));
        }

        for volume in &container.volumes {
            let row = volume.row();
            let mut spans = vec![
                Span::raw(format!("  {} ", row.name)),
                Span::styled(format!("[{}]", row.kind), Style::default().fg(theme.info)),
            ];
            if let Some(host) = row.host_path {
                spans.push(Span::raw(format!(" {host} ->")));
            }
            if let Some(path) = row.container_path {
                spans.push(Span::raw(format!(" {path}")));
            }
            if row.readonly == Some(true) {
                spans.push(Span::styled(" (ro)", theme.warning_style()));
            }
            lines.push(Line::from(spans));
        }

        for env in &container.env_vars {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", env.name), theme.muted_style()),
                Span::raw(format!("={}", env.value)),
            ]));
        }
    }
    lines
}
