//! Actions offered for an application and their selection by status.

use serde::{Deserialize, Serialize};

use crate::{AppRunningStatus, ConfirmPrompt};

/// A remote operation that can be triggered on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    CreateContainers,
    Start,
    Stop,
    DestroyContainers,
    Remove,
    GenerateTemplate,
}

/// Glyph shown next to an action label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon(pub &'static str);

impl Icon {
    pub const ADD: Icon = Icon("+");
    pub const PLAY: Icon = Icon("▶");
    pub const STOP: Icon = Icon("■");
    pub const DELETE: Icon = Icon("✖");
    pub const SNIPPET: Icon = Icon("≡");
    pub const SPINNER: Icon = Icon("⟳");
    pub const ERROR: Icon = Icon("!");

    pub fn glyph(&self) -> &'static str {
        self.0
    }
}

/// Color family an action is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorHint {
    Neutral,
    Blue,
    Yellow,
    Red,
}

/// Presentation and behavior of one action control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub icon: Icon,
    pub loading_icon: Icon,
    pub error_icon: Icon,
    pub label: &'static str,
    pub color: ColorHint,
    /// Title of the notification shown when the operation fails.
    pub error_title: Option<&'static str>,
    /// Whether the control stays usable after a successful run.
    pub redoable: bool,
    /// Prompt shown before dispatching, for destructive actions.
    pub confirmation: Option<ConfirmPrompt>,
}

impl ActionDescriptor {
    fn new(kind: ActionKind, icon: Icon, label: &'static str, color: ColorHint) -> Self {
        Self {
            kind,
            icon,
            loading_icon: Icon::SPINNER,
            error_icon: Icon::ERROR,
            label,
            color,
            error_title: None,
            redoable: false,
            confirmation: None,
        }
    }

    fn error_title(mut self, title: &'static str) -> Self {
        self.error_title = Some(title);
        self
    }

    fn redoable(mut self) -> Self {
        self.redoable = true;
        self
    }

    fn confirm(mut self, message: &str) -> Self {
        self.confirmation = Some(ConfirmPrompt::default().with_message(message));
        self
    }
}

impl ActionKind {
    /// Descriptor of the control bound to this action.
    pub fn descriptor(self) -> ActionDescriptor {
        match self {
            Self::CreateContainers => {
                ActionDescriptor::new(self, Icon::ADD, "Create containers", ColorHint::Blue)
                    .error_title("Failed to create application")
            }
            Self::Start => ActionDescriptor::new(self, Icon::PLAY, "Start", ColorHint::Blue)
                .error_title("Failed to start the application"),
            Self::Stop => ActionDescriptor::new(self, Icon::STOP, "Stop", ColorHint::Yellow)
                .error_title("Failed to stop the application"),
            Self::DestroyContainers => {
                ActionDescriptor::new(self, Icon::DELETE, "Remove containers", ColorHint::Red)
                    .error_title("Failed to destroy the application's containers")
                    .confirm("All containers of this application will be destroyed.")
            }
            Self::Remove => ActionDescriptor::new(self, Icon::DELETE, "Delete", ColorHint::Red)
                .error_title("Failed to remove the application")
                .confirm("This application will be deleted."),
            Self::GenerateTemplate => ActionDescriptor::new(
                self,
                Icon::SNIPPET,
                "Generate template",
                ColorHint::Neutral,
            )
            .redoable(),
        }
    }
}

/// Set of actions valid for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    /// Ordered actions to offer.
    Actions(&'static [ActionKind]),
    /// The status is known but no action is wired for it yet.
    Unimplemented,
}

impl ActionGroup {
    pub fn actions(&self) -> &'static [ActionKind] {
        match *self {
            Self::Actions(actions) => actions,
            Self::Unimplemented => &[],
        }
    }

    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented)
    }
}

/// Actions offered for every application whatever its status.
pub const STATUS_INDEPENDENT_ACTIONS: &[ActionKind] = &[ActionKind::GenerateTemplate];

/// Map an application status to the actions to offer.
///
/// The match has no wildcard arm: a new status variant does not compile until
/// it is given a grouping here.
pub fn select_actions(status: AppRunningStatus) -> ActionGroup {
    match status {
        AppRunningStatus::NotCreated => {
            ActionGroup::Actions(&[ActionKind::CreateContainers, ActionKind::Remove])
        }
        AppRunningStatus::Stopped => {
            ActionGroup::Actions(&[ActionKind::Start, ActionKind::DestroyContainers])
        }
        AppRunningStatus::FullyRunning => ActionGroup::Actions(&[ActionKind::Stop]),
        AppRunningStatus::PartiallyCreated
        | AppRunningStatus::Zombie
        | AppRunningStatus::Intermediary
        | AppRunningStatus::PartiallyRunning => ActionGroup::Unimplemented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_grouping() {
        for status in AppRunningStatus::ALL {
            let group = select_actions(status);
            match group {
                ActionGroup::Actions(actions) => assert!(!actions.is_empty(), "{status:?}"),
                ActionGroup::Unimplemented => assert!(group.actions().is_empty()),
            }
        }
    }

    #[test]
    fn test_groupings() {
        assert_eq!(
            select_actions(AppRunningStatus::NotCreated).actions(),
            &[ActionKind::CreateContainers, ActionKind::Remove]
        );
        assert_eq!(
            select_actions(AppRunningStatus::Stopped).actions(),
            &[ActionKind::Start, ActionKind::DestroyContainers]
        );
        assert_eq!(
            select_actions(AppRunningStatus::FullyRunning).actions(),
            &[ActionKind::Stop]
        );
        for status in [
            AppRunningStatus::PartiallyCreated,
            AppRunningStatus::Zombie,
            AppRunningStatus::Intermediary,
            AppRunningStatus::PartiallyRunning,
        ] {
            assert!(select_actions(status).is_unimplemented());
        }
    }

    #[test]
    fn test_destructive_actions_carry_a_prompt() {
        for kind in [
            ActionKind::CreateContainers,
            ActionKind::Start,
            ActionKind::Stop,
            ActionKind::DestroyContainers,
            ActionKind::Remove,
            ActionKind::GenerateTemplate,
        ] {
            let destructive = matches!(kind, ActionKind::DestroyContainers | ActionKind::Remove);
            assert_eq!(kind.descriptor().confirmation.is_some(), destructive, "{kind:?}");
        }
    }

    #[test]
    fn test_only_template_generation_is_redoable() {
        assert!(ActionKind::GenerateTemplate.descriptor().redoable);
        assert!(!ActionKind::Start.descriptor().redoable);
        assert_eq!(ActionKind::Stop.descriptor().color, ColorHint::Yellow);
    }
}
