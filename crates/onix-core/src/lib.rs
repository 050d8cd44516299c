//! Onix Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - Network/GraphQL
//! - Terminal rendering
//! - Runtime specifics
//!
//! It holds the application model mirrored from the backend, the projection of
//! in-flight operations into control states, and the status-driven selection of
//! the actions offered for an application.

pub mod actions;
pub mod app;
pub mod confirm;
pub mod control;
pub mod error;
pub mod ids;
pub mod notify;
pub mod operation;
pub mod status;
pub mod volume;

// Re-export commonly used types
pub use actions::{
    select_actions, ActionDescriptor, ActionGroup, ActionKind, ColorHint, Icon,
    STATUS_INDEPENDENT_ACTIONS,
};
pub use app::{App, AppContainer, DockerContainer, EnvVar, Port, PortBinding, PortType};
pub use confirm::{ConfirmPrompt, ConfirmationGate};
pub use control::{ActionControl, Invocation, OperationTrigger};
pub use error::CoreError;
pub use ids::{AppId, ContainerId, OperationId};
pub use notify::{Notification, NotificationSink, Severity};
pub use operation::{
    ActionState, OperationError, OperationOutput, OperationResult, StateProjector, Transition,
};
pub use status::{AppRunningStatus, ContainerStatus};
pub use volume::{AppVolume, AppVolumeType, VolumeRow};
