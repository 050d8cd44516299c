//! Per-application action controls, kept in sync with application status.
//!
//! Controls are rebuilt from [`select_actions`] every time an application's
//! status is refreshed. A control whose action is still offered survives the
//! refresh with its state; one whose action is no longer offered is dropped,
//! and late results for its operation are discarded.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use onix_core::{
    select_actions, ActionControl, ActionGroup, ActionKind, App, AppId, AppRunningStatus,
    ConfirmPrompt, Invocation, NotificationSink, OperationError, OperationId, OperationOutput,
    OperationTrigger, STATUS_INDEPENDENT_ACTIONS,
};

use crate::event::BackendCommand;

/// Commands queued by controls, flushed to the backend by the UI loop.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queue: Arc<Mutex<VecDeque<BackendCommand>>>,
}

impl Outbox {
    pub fn push(&self, cmd: BackendCommand) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(cmd);
    }

    /// Take every queued command, oldest first.
    pub fn drain(&self) -> Vec<BackendCommand> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }
}

impl OperationTrigger for Outbox {
    fn trigger(&self, op_id: OperationId, app_id: &AppId, kind: ActionKind) {
        self.push(BackendCommand::RunOperation {
            op_id,
            app_id: app_id.clone(),
            kind,
        });
    }
}

/// Actions to offer for a status, status-independent ones last.
pub fn offered_actions(status: AppRunningStatus) -> Vec<ActionKind> {
    select_actions(status)
        .actions()
        .iter()
        .chain(STATUS_INDEPENDENT_ACTIONS)
        .copied()
        .collect()
}

/// Builds controls wired to the outbox and the notification sink.
#[derive(Clone)]
struct ControlFactory {
    outbox: Outbox,
    sink: Arc<dyn NotificationSink>,
}

impl ControlFactory {
    fn build(&self, app_id: &AppId, kind: ActionKind) -> ActionControl {
        let outbox = self.outbox.clone();
        let refresh_id = app_id.clone();

        ActionControl::new(app_id.clone(), kind, Arc::new(self.outbox.clone()))
            .with_notifier(self.sink.clone())
            .on_finished(move |succeeded| {
                debug!(app_id = %refresh_id, kind = ?kind, succeeded, "Action finished, re-fetching app");
                outbox.push(BackendCommand::RefreshApp(refresh_id.clone()));
            })
    }
}

/// Controls of one application.
pub struct AppControls {
    app_id: AppId,
    group: ActionGroup,
    controls: Vec<ActionControl>,
    focus: usize,
}

impl AppControls {
    fn new(app_id: AppId, status: AppRunningStatus, factory: &ControlFactory) -> Self {
        let mut controls = Self {
            app_id,
            group: select_actions(status),
            controls: Vec::new(),
            focus: 0,
        };
        controls.sync(status, factory);
        controls
    }

    /// Re-evaluate the offered actions for `status`.
    fn sync(&mut self, status: AppRunningStatus, factory: &ControlFactory) {
        self.group = select_actions(status);

        let mut previous = std::mem::take(&mut self.controls);
        self.controls = offered_actions(status)
            .into_iter()
            .map(|kind| match previous.iter().position(|c| c.kind() == kind) {
                Some(pos) => previous.swap_remove(pos),
                None => factory.build(&self.app_id, kind),
            })
            .collect();

        for dropped in previous {
            debug!(
                app_id = %self.app_id,
                kind = ?dropped.kind(),
                in_flight = dropped.in_flight().is_some(),
                "Action no longer offered, dropping control"
            );
        }

        self.focus = self.focus.min(self.controls.len().saturating_sub(1));
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Grouping selected for the current status.
    pub fn group(&self) -> ActionGroup {
        self.group
    }

    pub fn controls(&self) -> &[ActionControl] {
        &self.controls
    }

    /// Kinds of the current controls, in display order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.controls.iter().map(|c| c.kind()).collect()
    }

    pub fn control(&self, kind: ActionKind) -> Option<&ActionControl> {
        self.controls.iter().find(|c| c.kind() == kind)
    }

    pub fn control_mut(&mut self, kind: ActionKind) -> Option<&mut ActionControl> {
        self.controls.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        if !self.controls.is_empty() {
            self.focus = (self.focus + 1) % self.controls.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.controls.is_empty() {
            self.focus = (self.focus + self.controls.len() - 1) % self.controls.len();
        }
    }

    /// Invoke the focused control.
    pub fn invoke_focused(&mut self) -> Invocation {
        match self.controls.get_mut(self.focus) {
            Some(control) => control.invoke(),
            None => Invocation::Ignored,
        }
    }

    /// Invoke the control of `kind`, if offered.
    pub fn invoke(&mut self, kind: ActionKind) -> Invocation {
        match self.control_mut(kind) {
            Some(control) => control.invoke(),
            None => Invocation::Ignored,
        }
    }

    /// Prompt of the control awaiting confirmation, if any.
    pub fn pending_confirmation(&self) -> Option<&ConfirmPrompt> {
        self.controls.iter().find_map(|c| c.pending_confirmation())
    }

    /// Confirm the pending prompt.
    pub fn confirm_pending(&mut self) -> Invocation {
        match self
            .controls
            .iter_mut()
            .find(|c| c.pending_confirmation().is_some())
        {
            Some(control) => control.confirm(),
            None => Invocation::Ignored,
        }
    }

    /// Dismiss the pending prompt.
    pub fn cancel_pending(&mut self) {
        for control in &mut self.controls {
            control.cancel();
        }
    }
}

/// Controls of every known application.
pub struct ControlBoard {
    factory: ControlFactory,
    apps: HashMap<AppId, AppControls>,
}

impl ControlBoard {
    pub fn new(outbox: Outbox, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            factory: ControlFactory { outbox, sink },
            apps: HashMap::new(),
        }
    }

    /// Sync against a full application list; applications that disappeared
    /// lose their controls.
    pub fn sync_apps(&mut self, apps: &[App]) {
        self.apps
            .retain(|id, _| apps.iter().any(|app| &app.id == id));
        for app in apps {
            self.sync_app(app);
        }
    }

    /// Sync one application.
    pub fn sync_app(&mut self, app: &App) {
        let factory = &self.factory;
        let controls = match self.apps.entry(app.id.clone()) {
            Entry::Occupied(entry) => {
                let controls = entry.into_mut();
                controls.sync(app.status, factory);
                controls
            }
            Entry::Vacant(entry) => entry.insert(AppControls::new(app.id.clone(), app.status, factory)),
        };
        debug!(app_id = %app.id, status = ?app.status, offered = ?controls.kinds(), "Controls synced");
    }

    pub fn get(&self, app_id: &AppId) -> Option<&AppControls> {
        self.apps.get(app_id)
    }

    pub fn get_mut(&mut self, app_id: &AppId) -> Option<&mut AppControls> {
        self.apps.get_mut(app_id)
    }

    /// Deliver the outcome of an operation to the control that dispatched it.
    ///
    /// Returns the control if it still exists and was waiting for `op_id`.
    pub fn settle(
        &mut self,
        app_id: &AppId,
        op_id: OperationId,
        outcome: Result<OperationOutput, OperationError>,
    ) -> Option<&ActionControl> {
        let Some(controls) = self.apps.get_mut(app_id) else {
            debug!(op = %op_id.short(), app_id = %app_id, "Result for unknown app discarded");
            return None;
        };

        let Some(control) = controls
            .controls
            .iter_mut()
            .find(|c| c.in_flight() == Some(op_id))
        else {
            debug!(op = %op_id.short(), app_id = %app_id, "Result for dropped control discarded");
            return None;
        };

        control.settle(op_id, outcome);
        Some(&*control)
    }
}
