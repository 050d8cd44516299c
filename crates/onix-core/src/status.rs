//! Status enums for applications and their containers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an application, as computed by the backend from the
/// docker containers it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppRunningStatus {
    /// None of the application's containers exist.
    NotCreated,
    /// Some containers exist, others are missing.
    PartiallyCreated,
    /// Containers exist that no longer match the application's declaration.
    Zombie,
    /// At least one container is transitioning (restarting, removing, ...).
    Intermediary,
    /// All containers exist and none is running.
    Stopped,
    /// Some containers are running, others are not.
    PartiallyRunning,
    /// Every container is running.
    FullyRunning,
}

impl AppRunningStatus {
    /// Every variant, in lifecycle order.
    pub const ALL: [AppRunningStatus; 7] = [
        Self::NotCreated,
        Self::PartiallyCreated,
        Self::Zombie,
        Self::Intermediary,
        Self::Stopped,
        Self::PartiallyRunning,
        Self::FullyRunning,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotCreated => "Not created",
            Self::PartiallyCreated => "Partially created",
            Self::Zombie => "Zombie",
            Self::Intermediary => "Intermediary",
            Self::Stopped => "Stopped",
            Self::PartiallyRunning => "Partially running",
            Self::FullyRunning => "Running",
        }
    }

    /// Returns true if the status denotes an inconsistent container set.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::PartiallyCreated | Self::Zombie)
    }

    /// Returns true if at least one container is expected to be running.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::PartiallyRunning | Self::FullyRunning)
    }
}

impl fmt::Display for AppRunningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of a docker container backing an application container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    Created,
    Restarting,
    Running,
    Removing,
    Paused,
    Exited,
    Dead,
}

impl ContainerStatus {
    /// Human-readable label. Exited containers are shown as stopped.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Restarting => "Restarting",
            Self::Running => "Running",
            Self::Removing => "Removing",
            Self::Paused => "Paused",
            Self::Exited => "Stopped",
            Self::Dead => "Dead",
        }
    }

    /// Returns true if the container is in a transient state.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Restarting | Self::Removing | Self::Paused)
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let status: AppRunningStatus = serde_json::from_str("\"PARTIALLY_RUNNING\"").unwrap();
        assert_eq!(status, AppRunningStatus::PartiallyRunning);

        let encoded = serde_json::to_string(&AppRunningStatus::NotCreated).unwrap();
        assert_eq!(encoded, "\"NOT_CREATED\"");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<AppRunningStatus, _> = serde_json::from_str("\"EXPLODED\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_exited_container_reads_as_stopped() {
        let status: ContainerStatus = serde_json::from_str("\"EXITED\"").unwrap();
        assert_eq!(status.to_string(), "Stopped");
        assert!(!status.is_transient());
    }

    #[test]
    fn test_status_groups() {
        assert!(AppRunningStatus::Zombie.is_degraded());
        assert!(AppRunningStatus::FullyRunning.is_running());
        assert!(!AppRunningStatus::Stopped.is_running());
    }
}
