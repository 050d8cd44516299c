//! UI state for rendering.

use chrono::{DateTime, Local};

use onix_client::ServerInfo;
use onix_core::{App, AppId, CoreError};

use crate::event::ConnectionState;

/// Available views in the TUI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Table of every application.
    #[default]
    Apps,
    /// Details of one application.
    AppDetail(AppId),
}

/// A generated template shown in a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePopup {
    pub app_name: String,
    pub yaml: String,
    pub scroll: u16,
}

impl TemplatePopup {
    pub fn new(app_name: impl Into<String>, yaml: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            yaml: yaml.into(),
            scroll: 0,
        }
    }

    pub fn scroll_down(&mut self) {
        let last_line = self.yaml.lines().count().saturating_sub(1);
        let max = u16::try_from(last_line).unwrap_or(u16::MAX);
        self.scroll = self.scroll.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

/// Snapshot of data for rendering (no async, no locks).
#[derive(Debug, Default)]
pub struct UiState {
    /// Applications sorted by name.
    pub apps: Vec<App>,

    /// Index of the selected row in the apps table.
    pub selected: usize,

    /// Current view.
    pub view: View,

    /// Connection to the backend.
    pub connection_state: ConnectionState,

    /// Backend versions, once connected.
    pub server_info: Option<ServerInfo>,

    /// Status message to display in footer.
    pub status_message: Option<String>,

    /// Last fetch error (if any).
    pub last_error: Option<String>,

    /// When the application list was last fetched.
    pub last_refresh: Option<DateTime<Local>>,

    /// Template popup, when open.
    pub template: Option<TemplatePopup>,
}

impl UiState {
    /// Replace the application list, keeping the selection on the same
    /// application when it still exists.
    pub fn set_apps(&mut self, mut apps: Vec<App>) {
        let selected_id = self.selected_app().map(|a| a.id.clone());
        apps.sort_by(|a, b| a.name.cmp(&b.name));
        self.apps = apps;

        self.selected = selected_id
            .and_then(|id| self.apps.iter().position(|a| a.id == id))
            .unwrap_or(self.selected)
            .min(self.apps.len().saturating_sub(1));

        if let View::AppDetail(id) = &self.view {
            if self.app(id).is_err() {
                self.view = View::Apps;
            }
        }
    }

    /// Insert or replace one application.
    pub fn upsert_app(&mut self, app: App) {
        match self.apps.iter_mut().find(|a| a.id == app.id) {
            Some(existing) => *existing = app,
            None => {
                let mut apps = std::mem::take(&mut self.apps);
                apps.push(app);
                self.set_apps(apps);
            }
        }
    }

    pub fn app(&self, id: &AppId) -> Result<&App, CoreError> {
        self.apps
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| CoreError::AppNotFound(id.to_string()))
    }

    pub fn selected_app(&self) -> Option<&App> {
        self.apps.get(self.selected)
    }

    /// Application the user is acting on: the open one in the detail view,
    /// the selected row otherwise.
    pub fn current_app_id(&self) -> Option<AppId> {
        match &self.view {
            View::AppDetail(id) => Some(id.clone()),
            View::Apps => self.selected_app().map(|a| a.id.clone()),
        }
    }

    pub fn select_next(&mut self) {
        if !self.apps.is_empty() {
            self.selected = (self.selected + 1).min(self.apps.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
