//! Event types for communication between the backend thread and the UI.

use std::time::Duration;

use onix_client::ServerInfo;
use onix_core::{ActionKind, App, AppId, OperationError, OperationId, OperationOutput};

/// Connection state for the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConnectionState {
    /// Currently attempting to connect.
    #[default]
    Connecting,

    /// The last request reached the backend.
    Connected,

    /// Disconnected, will retry after the specified duration.
    Disconnected { retry_in: Duration },
}

/// Events sent from the backend thread to the UI thread.
#[derive(Debug)]
pub enum UiEvent {
    /// The full application list was fetched.
    AppsUpdated(Vec<App>),

    /// One application was re-fetched.
    AppUpdated(App),

    /// Backend versions, fetched once connected.
    ServerInfo(ServerInfo),

    /// A dispatched operation settled.
    OperationFinished {
        app_id: AppId,
        op_id: OperationId,
        outcome: Result<OperationOutput, OperationError>,
    },

    /// A fetch failed.
    Error(String),

    /// Connection state changed.
    ConnectionStateChanged(ConnectionState),
}

/// Commands sent from the UI to the backend thread.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    /// Refresh the application list.
    RefreshApps,

    /// Re-fetch one application after an operation finished.
    RefreshApp(AppId),

    /// Run a lifecycle operation.
    RunOperation {
        op_id: OperationId,
        app_id: AppId,
        kind: ActionKind,
    },

    /// Force immediate reconnect attempt.
    ForceReconnect,

    /// Quit the application.
    Quit,
}
