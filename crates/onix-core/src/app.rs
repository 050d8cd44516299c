//! Application and container types mirrored from the backend.

use crate::{AppId, AppRunningStatus, AppVolume, ContainerId, ContainerStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An application: a named set of containers managed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    /// Unique application identifier.
    pub id: AppId,

    /// Display name (unique across applications).
    pub name: String,

    /// Declared containers.
    pub containers: Vec<AppContainer>,

    /// Status as last fetched from the backend.
    pub status: AppRunningStatus,
}

impl App {
    /// Create an application with no containers.
    pub fn new(id: impl Into<AppId>, name: impl Into<String>, status: AppRunningStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            containers: Vec::new(),
            status,
        }
    }

    /// Builder method to add a container.
    pub fn with_container(mut self, container: AppContainer) -> Self {
        self.containers.push(container);
        self
    }

    /// Number of declared containers whose docker container is running.
    pub fn running_containers(&self) -> usize {
        self.containers
            .iter()
            .filter(|c| c.status() == Some(ContainerStatus::Running))
            .count()
    }
}

/// A container declared by an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppContainer {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub env_vars: Vec<EnvVar>,
    pub port_bindings: Vec<PortBinding>,
    pub volumes: Vec<AppVolume>,
    /// Names of the containers this one depends on.
    pub depends_on: Vec<String>,
    /// The docker container currently backing this declaration, if created.
    pub docker_container: Option<DockerContainer>,
}

impl AppContainer {
    /// Create a container declaration with only a name and an image.
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: ContainerId::new(id),
            name: name.into(),
            image: image.into(),
            env_vars: Vec::new(),
            port_bindings: Vec::new(),
            volumes: Vec::new(),
            depends_on: Vec::new(),
            docker_container: None,
        }
    }

    /// Builder method to attach the backing docker container.
    pub fn with_docker_container(mut self, container: DockerContainer) -> Self {
        self.docker_container = Some(container);
        self
    }

    /// Status of the backing docker container; `None` means not created.
    pub fn status(&self) -> Option<ContainerStatus> {
        self.docker_container.as_ref().map(|c| c.status)
    }

    /// Label for the container status, including the not-created case.
    pub fn status_label(&self) -> &'static str {
        self.status().map(|s| s.label()).unwrap_or("Not created")
    }
}

/// A docker container as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerContainer {
    pub docker_container_id: String,
    pub docker_container_name: String,
    pub status: ContainerStatus,
}

/// An environment variable passed to a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// Transport protocol(s) covered by a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortType {
    TcpUdp,
    Tcp,
    Udp,
}

/// A port number together with its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub port: u16,
    pub port_type: PortType,
}

impl Port {
    pub fn new(port: u16, port_type: PortType) -> Self {
        Self { port, port_type }
    }

    /// Docker notation: `80`, `80/tcp` or `53/udp`.
    pub fn to_docker_port(self) -> String {
        let suffix = match self.port_type {
            PortType::TcpUdp => "",
            PortType::Tcp => "/tcp",
            PortType::Udp => "/udp",
        };
        format!("{}{}", self.port, suffix)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_docker_port())
    }
}

/// Publication of a container port on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortBinding {
    pub host_port: Port,
    pub container_port: Port,
}

impl fmt::Display for PortBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(host) {} <=> {} (container)",
            self.host_port, self.container_port
        )
    }
}
