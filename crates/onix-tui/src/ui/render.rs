//! Main render function for the TUI.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use onix_tui_components::{
    format_elapsed, ConfirmDialog, Footer, Header, HeaderStat, StatusIndicator, TextPopup,
    Theme, ToastStack, ToastView,
};

use crate::controls::ControlBoard;
use crate::event::ConnectionState;
use crate::notifications::Toast;
use crate::state::{UiState, View};

use super::{apps, detail, severity_color};

/// Render the entire UI.
pub fn render(frame: &mut Frame, state: &UiState, controls: &ControlBoard, toasts: &[Toast]) {
    let theme = Theme::default();

    // Create main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, state, &theme);

    match &state.view {
        View::Apps => apps::render(frame, body_area, state, controls, &theme),
        View::AppDetail(id) => detail::render(frame, body_area, state, id, controls, &theme),
    }

    render_footer(frame, footer_area, state, &theme);

    // Overlays, bottom to top
    if let Some(prompt) = state
        .current_app_id()
        .and_then(|id| controls.get(&id))
        .and_then(|c| c.pending_confirmation())
    {
        ConfirmDialog::new(&prompt.title, &prompt.message)
            .labels(&prompt.confirm_label, &prompt.cancel_label)
            .theme(theme.clone())
            .render(frame);
    }

    if let Some(popup) = &state.template {
        let title = format!("Template: {}", popup.app_name);
        TextPopup::new(&title, &popup.yaml)
            .scroll(popup.scroll)
            .theme(theme.clone())
            .render(frame);
    }

    let views = toasts
        .iter()
        .map(|t| ToastView {
            title: &t.notification.title,
            description: &t.notification.description,
            color: severity_color(t.notification.severity, &theme),
        })
        .collect();
    ToastStack::new(views).render(frame);
}

fn render_header(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let status = match &state.connection_state {
        ConnectionState::Connecting => StatusIndicator::warning("Connecting"),
        ConnectionState::Connected => StatusIndicator::success("Connected"),
        ConnectionState::Disconnected { retry_in } => {
            StatusIndicator::error(format!("Disconnected ({}s)", retry_in.as_secs()))
        }
    };

    let mut header = Header::new("Onix").status(status).crumb("Apps");
    if let View::AppDetail(id) = &state.view {
        let name = state
            .app(id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|_| id.to_string());
        header = header.crumb(name);
    }

    header = header.stat(HeaderStat::new("Apps", state.apps.len().to_string()));
    if let Some(info) = &state.server_info {
        header = header.stat(HeaderStat::new("Server", info.server_version.clone()));
        header = header.stat(match &info.docker_version {
            Some(docker) => HeaderStat::new("Docker", docker.clone()),
            None => HeaderStat::new("Docker", "unavailable").color(theme.warning),
        });
    }
    if let Some(at) = state.last_refresh {
        let ago = (chrono::Local::now() - at).to_std().unwrap_or_default();
        header = header.stat(HeaderStat::new("Refreshed", format!("{} ago", format_elapsed(ago))));
    }

    header.theme(theme.clone()).render(frame, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &UiState, theme: &Theme) {
    let status = state.status_message.as_deref().unwrap_or("Ready");
    let color = match (&state.connection_state, &state.last_error) {
        (ConnectionState::Connected, None) => theme.success,
        (ConnectionState::Connected, Some(_)) | (ConnectionState::Connecting, _) => theme.warning,
        (ConnectionState::Disconnected { .. }, _) => theme.error,
    };

    let mut footer = Footer::new().status(status, color).hint("q", "quit");
    footer = match state.view {
        View::Apps => footer.hint("j/k", "select").hint("Enter", "open"),
        View::AppDetail(_) => footer
            .hint("h/l", "action")
            .hint("Enter", "run")
            .hint("Esc", "back"),
    };
    footer
        .hint("t", "template")
        .hint("r", "refresh")
        .hint("c", "clear")
        .theme(theme.clone())
        .render(frame, area);
}
