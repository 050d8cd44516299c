//! Application state and main event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::debug;

use onix_core::{ActionKind, AppId, Invocation, OperationOutput};

use crate::controls::{AppControls, ControlBoard, Outbox};
use crate::event::{BackendCommand, ConnectionState, UiEvent};
use crate::notifications::ToastStore;
use crate::state::{TemplatePopup, UiState, View};
use crate::ui;

/// Main application with UI state and channel handles.
pub struct App {
    /// Current UI state snapshot for rendering.
    state: UiState,

    /// Action controls of every application.
    controls: ControlBoard,

    /// Commands queued by controls.
    outbox: Outbox,

    /// Failure notifications.
    toasts: ToastStore,

    /// Receiver for events from the backend.
    ui_rx: mpsc::Receiver<UiEvent>,

    /// Sender for commands to the backend.
    cmd_tx: mpsc::Sender<BackendCommand>,
}

impl App {
    /// Create a new application instance with channel handles.
    pub fn new(ui_rx: mpsc::Receiver<UiEvent>, cmd_tx: mpsc::Sender<BackendCommand>) -> Self {
        let outbox = Outbox::default();
        let toasts = ToastStore::new();
        Self {
            state: UiState::default(),
            controls: ControlBoard::new(outbox.clone(), Arc::new(toasts.clone())),
            outbox,
            toasts,
            ui_rx,
            cmd_tx,
        }
    }

    /// Run the main event loop.
    ///
    /// This runs on the main thread and handles:
    /// - Drawing the UI
    /// - Processing keyboard input
    /// - Receiving updates from the backend
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            let toasts = self.toasts.visible(Instant::now());
            terminal.draw(|frame| ui::render(frame, &self.state, &self.controls, &toasts))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key.code) {
                        break;
                    }
                }
            }

            while let Ok(event) = self.ui_rx.try_recv() {
                self.apply_event(event);
            }

            self.flush_outbox();
        }

        let _ = self.cmd_tx.blocking_send(BackendCommand::Quit);

        Ok(())
    }

    /// Forward commands queued by controls to the backend.
    fn flush_outbox(&mut self) {
        for cmd in self.outbox.drain() {
            debug!(cmd = ?cmd, "Sending backend command");
            let _ = self.cmd_tx.blocking_send(cmd);
        }
    }

    /// Apply an event from the backend to the UI state.
    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AppsUpdated(apps) => {
                self.state.set_apps(apps);
                self.controls.sync_apps(&self.state.apps);
                self.state.last_error = None;
                self.state.last_refresh = Some(chrono::Local::now());
            }
            UiEvent::AppUpdated(app) => {
                self.controls.sync_app(&app);
                self.state.upsert_app(app);
                self.state.last_error = None;
            }
            UiEvent::ServerInfo(info) => {
                self.state.server_info = Some(info);
            }
            UiEvent::OperationFinished {
                app_id,
                op_id,
                outcome,
            } => {
                let Some(control) = self.controls.settle(&app_id, op_id, outcome) else {
                    return;
                };
                if let Some(OperationOutput::Template(yaml)) = control.result().value() {
                    let name = self
                        .state
                        .app(&app_id)
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|_| app_id.to_string());
                    self.state.template = Some(TemplatePopup::new(name, yaml.clone()));
                }
            }
            UiEvent::Error(msg) => {
                self.state.last_error = Some(msg);
            }
            UiEvent::ConnectionStateChanged(new_state) => {
                self.state.connection_state = new_state;
                if matches!(self.state.connection_state, ConnectionState::Connected) {
                    self.state.last_error = None;
                }
            }
        }
        self.update_status();
    }

    /// Update the status message based on current state.
    fn update_status(&mut self) {
        self.state.status_message = Some(match &self.state.connection_state {
            ConnectionState::Connecting => "Connecting...".to_string(),
            ConnectionState::Connected => match &self.state.last_error {
                Some(error) => format!("Connected (error: {})", error),
                None => format!("Connected | Apps: {}", self.state.apps.len()),
            },
            ConnectionState::Disconnected { retry_in } => format!(
                "Disconnected - retrying in {}s (press 'r' to retry now)",
                retry_in.as_secs()
            ),
        });
    }

    fn current_controls(&mut self) -> Option<&mut AppControls> {
        let id = self.state.current_app_id()?;
        self.controls.get_mut(&id)
    }

    fn log_invocation(app_id: Option<&AppId>, kind: Option<ActionKind>, invocation: Invocation) {
        debug!(app_id = ?app_id, kind = ?kind, invocation = ?invocation, "Action invoked");
    }

    /// Handle a key press.
    ///
    /// Returns true if the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        // The template popup captures every key while open.
        if let Some(popup) = self.state.template.as_mut() {
            match code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => self.state.template = None,
                KeyCode::Down | KeyCode::Char('j') => popup.scroll_down(),
                KeyCode::Up | KeyCode::Char('k') => popup.scroll_up(),
                _ => {}
            }
            return false;
        }

        // So does a pending confirmation.
        if let Some(controls) = self.current_controls() {
            if controls.pending_confirmation().is_some() {
                match code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        let invocation = controls.confirm_pending();
                        Self::log_invocation(Some(controls.app_id()), None, invocation);
                    }
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        controls.cancel_pending();
                    }
                    _ => {}
                }
                return false;
            }
        }

        match code {
            KeyCode::Char('q') => {
                return true;
            }

            // Escape goes back from the detail view, quits from the list
            KeyCode::Esc => match self.state.view {
                View::AppDetail(_) => self.state.view = View::Apps,
                View::Apps => return true,
            },

            KeyCode::Up | KeyCode::Char('k') => {
                if self.state.view == View::Apps {
                    self.state.select_prev();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state.view == View::Apps {
                    self.state.select_next();
                }
            }

            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(controls) = self.current_controls() {
                    controls.focus_prev();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(controls) = self.current_controls() {
                    controls.focus_next();
                }
            }

            // Enter opens the detail view, then invokes the focused action
            KeyCode::Enter => match self.state.view {
                View::Apps => {
                    if let Some(app) = self.state.selected_app() {
                        self.state.view = View::AppDetail(app.id.clone());
                    }
                }
                View::AppDetail(_) => {
                    if let Some(controls) = self.current_controls() {
                        let invocation = controls.invoke_focused();
                        Self::log_invocation(Some(controls.app_id()), None, invocation);
                    }
                }
            },

            KeyCode::Char('t') => {
                if let Some(controls) = self.current_controls() {
                    let invocation = controls.invoke(ActionKind::GenerateTemplate);
                    Self::log_invocation(
                        Some(controls.app_id()),
                        Some(ActionKind::GenerateTemplate),
                        invocation,
                    );
                }
            }

            KeyCode::Char('c') => self.toasts.clear(),

            // Refresh / Reconnect
            KeyCode::Char('r') => match &self.state.connection_state {
                ConnectionState::Disconnected { .. } => {
                    let _ = self.cmd_tx.blocking_send(BackendCommand::ForceReconnect);
                }
                ConnectionState::Connected => {
                    let _ = self.cmd_tx.blocking_send(BackendCommand::RefreshApps);
                }
                ConnectionState::Connecting => {}
            },

            _ => {}
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onix_core::{ActionState, AppRunningStatus, OperationError, OperationId};

    fn app() -> (App, mpsc::Sender<UiEvent>, mpsc::Receiver<BackendCommand>) {
        let (ui_tx, ui_rx) = mpsc::channel(16);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        (App::new(ui_rx, cmd_tx), ui_tx, cmd_rx)
    }

    fn blog(status: AppRunningStatus) -> onix_core::App {
        onix_core::App::new("a1", "blog", status)
    }

    fn sent(app: &mut App, cmd_rx: &mut mpsc::Receiver<BackendCommand>) -> Vec<BackendCommand> {
        app.flush_outbox();
        let mut out = Vec::new();
        while let Ok(cmd) = cmd_rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    fn offered(app: &App) -> Vec<ActionKind> {
        app.controls.get(&AppId::new("a1")).unwrap().kinds()
    }

    #[test]
    fn test_create_containers_end_to_end() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::NotCreated)]));
        assert_eq!(
            offered(&app),
            vec![
                ActionKind::CreateContainers,
                ActionKind::Remove,
                ActionKind::GenerateTemplate
            ]
        );

        // Open the detail view; focus starts on the first action.
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);

        let cmds = sent(&mut app, &mut cmd_rx);
        let op_id = match cmds.as_slice() {
            [BackendCommand::RunOperation { op_id, kind: ActionKind::CreateContainers, .. }] => *op_id,
            other => panic!("Unexpected commands {other:?}"),
        };
        let controls = app.controls.get(&AppId::new("a1")).unwrap();
        assert_eq!(
            controls.control(ActionKind::CreateContainers).unwrap().state(),
            Some(ActionState::Loading)
        );

        app.apply_event(UiEvent::OperationFinished {
            app_id: AppId::new("a1"),
            op_id,
            outcome: Ok(OperationOutput::Unit),
        });
        assert_eq!(
            sent(&mut app, &mut cmd_rx),
            vec![BackendCommand::RefreshApp(AppId::new("a1"))]
        );

        app.apply_event(UiEvent::AppUpdated(blog(AppRunningStatus::Stopped)));
        assert_eq!(
            offered(&app),
            vec![
                ActionKind::Start,
                ActionKind::DestroyContainers,
                ActionKind::GenerateTemplate
            ]
        );
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::NotCreated)]));

        // Focus Remove and invoke it from the list.
        app.handle_key(KeyCode::Char('l'));
        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        assert!(sent(&mut app, &mut cmd_rx).is_empty());

        // 'q' does not quit while the prompt is open.
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Char('n'));
        assert!(sent(&mut app, &mut cmd_rx).is_empty());

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Char('y'));
        let cmds = sent(&mut app, &mut cmd_rx);
        assert!(matches!(
            cmds.as_slice(),
            [BackendCommand::RunOperation { kind: ActionKind::Remove, .. }]
        ));
    }

    #[test]
    fn test_template_opens_popup() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::FullyRunning)]));

        app.handle_key(KeyCode::Char('t'));
        let op_id = match sent(&mut app, &mut cmd_rx).as_slice() {
            [BackendCommand::RunOperation { op_id, .. }] => *op_id,
            other => panic!("Unexpected commands {other:?}"),
        };

        app.apply_event(UiEvent::OperationFinished {
            app_id: AppId::new("a1"),
            op_id,
            outcome: Ok(OperationOutput::Template("name: blog\n".into())),
        });
        let popup = app.state.template.as_ref().unwrap();
        assert_eq!(popup.app_name, "blog");
        assert_eq!(popup.yaml, "name: blog\n");

        // Esc closes the popup without leaving the list.
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(app.state.template.is_none());
    }

    #[test]
    fn test_failure_raises_toast() {
        let (mut app, _ui_tx, mut cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::FullyRunning)]));

        app.handle_key(KeyCode::Enter);
        app.handle_key(KeyCode::Enter);
        let op_id = match sent(&mut app, &mut cmd_rx).as_slice() {
            [BackendCommand::RunOperation { op_id, kind: ActionKind::Stop, .. }] => *op_id,
            other => panic!("Unexpected commands {other:?}"),
        };

        app.apply_event(UiEvent::OperationFinished {
            app_id: AppId::new("a1"),
            op_id,
            outcome: Err(OperationError::new("container is restarting")),
        });

        let toasts = app.toasts.visible(Instant::now());
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].notification.title, "Failed to stop the application");
        assert_eq!(toasts[0].notification.description, "container is restarting");
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::Stopped)]));

        app.apply_event(UiEvent::OperationFinished {
            app_id: AppId::new("a1"),
            op_id: OperationId::generate(),
            outcome: Err(OperationError::new("late")),
        });
        assert!(app.toasts.visible(Instant::now()).is_empty());
    }

    #[test]
    fn test_escape_navigation() {
        let (mut app, _ui_tx, _cmd_rx) = app();
        app.apply_event(UiEvent::AppsUpdated(vec![blog(AppRunningStatus::Stopped)]));

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.state.view, View::AppDetail(AppId::new("a1")));
        assert!(!app.handle_key(KeyCode::Esc));
        assert_eq!(app.state.view, View::Apps);
        assert!(app.handle_key(KeyCode::Esc));
    }
}
