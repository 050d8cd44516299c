//! Action controls: one remote operation bound to one application.
//!
//! A control owns the [`OperationResult`] of its latest dispatch and samples
//! it through a [`StateProjector`]. Effects run from the detected transitions:
//! the state-change hook, the finished hook, and the failure notification.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    ActionDescriptor, ActionKind, ActionState, AppId, ConfirmPrompt, ConfirmationGate, Icon,
    Notification, NotificationSink, OperationError, OperationId, OperationOutput, OperationResult,
    StateProjector, Transition,
};

/// Title used for failure notifications when the descriptor has none.
pub const DEFAULT_ERROR_TITLE: &str = "Operation failed";

/// Starts remote operations on behalf of controls.
///
/// Implementations return immediately; the outcome is reported later through
/// [`ActionControl::settle`] with the same [`OperationId`].
pub trait OperationTrigger {
    fn trigger(&self, id: OperationId, app_id: &AppId, kind: ActionKind);
}

/// Outcome of invoking a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The operation was dispatched.
    Dispatched(OperationId),
    /// A confirmation prompt was opened; nothing was dispatched yet.
    AwaitingConfirmation,
    /// The control is not interactive right now.
    Ignored,
}

type StateChangeHook = Box<dyn FnMut(ActionState)>;
type FinishedHook = Box<dyn FnMut(bool)>;

/// Interactive control bound to one action of one application.
pub struct ActionControl {
    app_id: AppId,
    descriptor: ActionDescriptor,
    trigger: Arc<dyn OperationTrigger>,
    result: OperationResult,
    projector: StateProjector,
    in_flight: Option<OperationId>,
    gate: ConfirmationGate,
    notifier: Option<Arc<dyn NotificationSink>>,
    on_state_change: Option<StateChangeHook>,
    on_finished: Option<FinishedHook>,
}

impl ActionControl {
    /// Create a control for `kind` on application `app_id`.
    pub fn new(app_id: AppId, kind: ActionKind, trigger: Arc<dyn OperationTrigger>) -> Self {
        Self {
            app_id,
            descriptor: kind.descriptor(),
            trigger,
            result: OperationResult::NotStarted,
            projector: StateProjector::new(),
            in_flight: None,
            gate: ConfirmationGate::new(),
            notifier: None,
            on_state_change: None,
            on_finished: None,
        }
    }

    /// Surface failures through the given sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Called once per observed state transition.
    pub fn on_state_change(mut self, hook: impl FnMut(ActionState) + 'static) -> Self {
        self.on_state_change = Some(Box::new(hook));
        self
    }

    /// Called each time a settled state is entered, with `true` on success.
    pub fn on_finished(mut self, hook: impl FnMut(bool) + 'static) -> Self {
        self.on_finished = Some(Box::new(hook));
        self
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn kind(&self) -> ActionKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    /// Latest operation result.
    pub fn result(&self) -> &OperationResult {
        &self.result
    }

    /// Derived state as of the last sample; `None` is idle.
    pub fn state(&self) -> Option<ActionState> {
        self.projector.current()
    }

    /// Id of the dispatch still awaiting its result, if any.
    pub fn in_flight(&self) -> Option<OperationId> {
        self.in_flight
    }

    /// Whether the control accepts an invocation.
    ///
    /// Loading is never interactive. Done stays non-interactive unless the
    /// action is redoable. Failed and idle are interactive.
    pub fn is_enabled(&self) -> bool {
        match self.state() {
            Some(ActionState::Loading) => false,
            Some(ActionState::Done) => self.descriptor.redoable,
            Some(ActionState::Failed) | None => true,
        }
    }

    /// Icon to display for the current state.
    pub fn icon(&self) -> Icon {
        match self.state() {
            Some(ActionState::Failed) => self.descriptor.error_icon,
            Some(ActionState::Loading) => self.descriptor.loading_icon,
            Some(ActionState::Done) | None => self.descriptor.icon,
        }
    }

    /// Prompt to display while a confirmation is pending.
    pub fn pending_confirmation(&self) -> Option<&ConfirmPrompt> {
        if self.gate.is_open() {
            self.descriptor.confirmation.as_ref()
        } else {
            None
        }
    }

    /// Invoke the control: dispatch right away, or open the confirmation
    /// prompt for destructive actions.
    pub fn invoke(&mut self) -> Invocation {
        if !self.is_enabled() {
            debug!(app_id = %self.app_id, kind = ?self.kind(), "Ignoring invoke on disabled control");
            return Invocation::Ignored;
        }

        if self.descriptor.confirmation.is_some() {
            self.gate.open();
            return Invocation::AwaitingConfirmation;
        }

        Invocation::Dispatched(self.dispatch())
    }

    /// Confirm a pending prompt and dispatch the operation.
    pub fn confirm(&mut self) -> Invocation {
        if !self.gate.confirm() || !self.is_enabled() {
            return Invocation::Ignored;
        }

        Invocation::Dispatched(self.dispatch())
    }

    /// Dismiss a pending prompt without side effects.
    pub fn cancel(&mut self) {
        self.gate.close();
    }

    /// Record the outcome of a dispatch.
    ///
    /// Returns false, leaving the control untouched, if `id` is not the
    /// dispatch this control is waiting for.
    pub fn settle(&mut self, id: OperationId, outcome: Result<OperationOutput, OperationError>) -> bool {
        if self.in_flight != Some(id) {
            warn!(op = %id.short(), app_id = %self.app_id, "Discarding result of unknown operation");
            return false;
        }

        self.in_flight = None;
        self.update(outcome.into());
        true
    }

    /// Replace the operation result and sample it.
    pub fn update(&mut self, result: OperationResult) -> Option<Transition> {
        self.result = result;
        self.sample()
    }

    /// Sample the current result, running hooks if the derived state changed.
    pub fn sample(&mut self) -> Option<Transition> {
        let transition = self.projector.observe(&self.result)?;

        debug!(
            app_id = %self.app_id,
            kind = ?self.kind(),
            from = ?transition.from,
            to = ?transition.to,
            "Action state changed"
        );

        if let (Some(state), Some(hook)) = (transition.to, self.on_state_change.as_mut()) {
            hook(state);
        }

        if let (OperationResult::Failed(error), Some(notifier)) = (&self.result, &self.notifier) {
            let title = self.descriptor.error_title.unwrap_or(DEFAULT_ERROR_TITLE);
            notifier.notify(Notification::error(title, error.message()));
        }

        if let (Some(succeeded), Some(hook)) = (transition.finished(), self.on_finished.as_mut()) {
            hook(succeeded);
        }

        Some(transition)
    }

    fn dispatch(&mut self) -> OperationId {
        let id = OperationId::generate();
        debug!(op = %id.short(), app_id = %self.app_id, kind = ?self.kind(), "Dispatching operation");

        self.in_flight = Some(id);
        self.trigger.trigger(id, &self.app_id, self.kind());
        self.update(OperationResult::Pending);
        id
    }
}
