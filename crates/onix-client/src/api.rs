//! Backend API consumed by the dashboard.

use async_trait::async_trait;

use onix_core::{ActionKind, App, AppId, AppRunningStatus, OperationOutput};

use crate::error::ClientError;

/// Versions reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    pub server_version: String,
    /// `None` when the backend cannot reach a docker daemon.
    pub docker_version: Option<String>,
}

/// Operations the dashboard needs from the backend.
#[async_trait]
pub trait OnixApi: Send + Sync {
    /// All applications with their containers and status.
    async fn list_apps(&self) -> Result<Vec<App>, ClientError>;

    /// One application with its containers and status.
    async fn get_app(&self, id: &AppId) -> Result<App, ClientError>;

    /// Current running status of one application.
    ///
    /// The dashboard re-fetches whole applications with [`get_app`](Self::get_app)
    /// instead; this query is kept so the trait covers the backend's full
    /// read surface.
    async fn app_status(&self, id: &AppId) -> Result<AppRunningStatus, ClientError>;

    /// Run a lifecycle action on an application.
    async fn run_operation(
        &self,
        kind: ActionKind,
        id: &AppId,
    ) -> Result<OperationOutput, ClientError>;

    /// Backend and docker versions.
    async fn server_info(&self) -> Result<ServerInfo, ClientError>;
}
