//! Results of remote operations and their projection into control states.
//!
//! The data-fetching layer reports each dispatched operation as an
//! [`OperationResult`]. Controls never inspect that result directly: a
//! [`StateProjector`] derives the discrete [`ActionState`] from it and reports
//! a [`Transition`] only when the derived state actually changes, so effects
//! tied to a state (notifications, re-fetches) run once per change rather
//! than once per sample.

use std::fmt;

/// Error reported by a settled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    message: String,
}

impl OperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message suitable for showing to the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for OperationError {}

/// Value produced by a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    /// The operation succeeded without a meaningful payload.
    Unit,
    /// A generated application template (YAML).
    Template(String),
}

/// Progress of one remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T = OperationOutput> {
    /// Not dispatched yet.
    NotStarted,
    /// Dispatched, awaiting settlement.
    Pending,
    /// Settled with an error.
    Failed(OperationError),
    /// Settled successfully. An empty payload still counts as success.
    Succeeded(T),
}

impl<T> Default for OperationResult<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> OperationResult<T> {
    /// Build a result from the tri-state record reported by some fetching
    /// layers. Precedence: pending, then failure, then value.
    ///
    /// A value is taken as present whenever it is `Some`, whatever it holds:
    /// an empty success payload is still a success.
    pub fn from_parts(pending: bool, failure: Option<OperationError>, value: Option<T>) -> Self {
        if pending {
            Self::Pending
        } else if let Some(error) = failure {
            Self::Failed(error)
        } else if let Some(value) = value {
            Self::Succeeded(value)
        } else {
            Self::NotStarted
        }
    }

    /// Derived control state; `None` means idle.
    pub fn state(&self) -> Option<ActionState> {
        match self {
            Self::NotStarted => None,
            Self::Pending => Some(ActionState::Loading),
            Self::Failed(_) => Some(ActionState::Failed),
            Self::Succeeded(_) => Some(ActionState::Done),
        }
    }

    pub fn error(&self) -> Option<&OperationError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Result<T, OperationError>> for OperationResult<T> {
    fn from(result: Result<T, OperationError>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Discrete state of an action control. Idle is represented by `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionState {
    Loading,
    Failed,
    Done,
}

/// A change of derived state between two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Option<ActionState>,
    pub to: Option<ActionState>,
}

impl Transition {
    /// `Some(succeeded)` if this transition enters a settled state.
    pub fn finished(&self) -> Option<bool> {
        match self.to {
            Some(ActionState::Done) => Some(true),
            Some(ActionState::Failed) => Some(false),
            Some(ActionState::Loading) | None => None,
        }
    }
}

/// Detects changes of derived state across successive samples.
#[derive(Debug, Clone, Default)]
pub struct StateProjector {
    current: Option<ActionState>,
}

impl StateProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// State derived from the last observed sample.
    pub fn current(&self) -> Option<ActionState> {
        self.current
    }

    /// Sample a result. Returns the transition if the derived state differs
    /// from the previous sample, `None` otherwise.
    pub fn observe<T>(&mut self, result: &OperationResult<T>) -> Option<Transition> {
        let next = result.state();
        if next == self.current {
            return None;
        }

        let transition = Transition {
            from: self.current,
            to: next,
        };
        self.current = next;
        Some(transition)
    }
}
