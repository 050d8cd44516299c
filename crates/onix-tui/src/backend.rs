//! Background task talking to the Onix backend.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use onix_client::{ClientError, OnixApi};
use onix_core::{ActionKind, AppId, OperationError, OperationId};

use crate::event::{BackendCommand, ConnectionState, UiEvent};

/// Run the background polling loop.
///
/// This function runs in a separate thread with its own tokio runtime. It
/// periodically fetches the application list, re-fetches single applications
/// on request, and runs each lifecycle operation as its own task. Results go
/// to the UI thread via the `ui_tx` channel.
pub async fn run_backend(
    api: Arc<dyn OnixApi>,
    refresh_interval: Duration,
    ui_tx: mpsc::Sender<UiEvent>,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
) {
    info!(refresh = ?refresh_interval, "Backend started");

    let mut poller = Poller::new(api.clone(), ui_tx.clone(), refresh_interval);
    poller.set_connection(ConnectionState::Connecting).await;

    let mut interval = tokio::time::interval(refresh_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                debug!("Refresh tick");
                poller.refresh_apps().await;
            }

            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    debug!("Command channel closed");
                    break;
                };

                match cmd {
                    BackendCommand::Quit => {
                        info!("Received quit command, shutting down backend");
                        break;
                    }
                    BackendCommand::RefreshApps => {
                        debug!("Manual refresh: apps");
                        poller.refresh_apps().await;
                    }
                    BackendCommand::ForceReconnect => {
                        debug!("Forced reconnect");
                        poller.set_connection(ConnectionState::Connecting).await;
                        poller.refresh_apps().await;
                        interval.reset();
                    }
                    BackendCommand::RefreshApp(app_id) => {
                        poller.refresh_app(&app_id).await;
                    }
                    BackendCommand::RunOperation { op_id, app_id, kind } => {
                        spawn_operation(api.clone(), ui_tx.clone(), op_id, app_id, kind);
                    }
                }
            }
        }
    }

    info!("Backend shutdown complete");
}

/// Run one operation on its own task and report its outcome.
fn spawn_operation(
    api: Arc<dyn OnixApi>,
    ui_tx: mpsc::Sender<UiEvent>,
    op_id: OperationId,
    app_id: AppId,
    kind: ActionKind,
) {
    tokio::spawn(async move {
        debug!(op = %op_id.short(), app_id = %app_id, kind = ?kind, "Operation started");

        let outcome = api
            .run_operation(kind, &app_id)
            .await
            .map_err(OperationError::from);

        match &outcome {
            Ok(_) => info!(op = %op_id.short(), app_id = %app_id, kind = ?kind, "Operation succeeded"),
            Err(e) => warn!(op = %op_id.short(), app_id = %app_id, kind = ?kind, error = %e, "Operation failed"),
        }

        let _ = ui_tx
            .send(UiEvent::OperationFinished {
                app_id,
                op_id,
                outcome,
            })
            .await;
    });
}

/// Fetches state from the backend and tracks whether it is reachable.
struct Poller {
    api: Arc<dyn OnixApi>,
    ui_tx: mpsc::Sender<UiEvent>,
    refresh_interval: Duration,
    connection: Option<ConnectionState>,
}

impl Poller {
    fn new(api: Arc<dyn OnixApi>, ui_tx: mpsc::Sender<UiEvent>, refresh_interval: Duration) -> Self {
        Self {
            api,
            ui_tx,
            refresh_interval,
            connection: None,
        }
    }

    async fn set_connection(&mut self, state: ConnectionState) {
        if self.connection.as_ref() == Some(&state) {
            return;
        }

        debug!(state = ?state, "Connection state changed");
        self.connection = Some(state.clone());
        let _ = self.ui_tx.send(UiEvent::ConnectionStateChanged(state)).await;
    }

    /// Record a successful round trip, fetching server info on (re)connect.
    async fn mark_connected(&mut self) {
        if self.connection == Some(ConnectionState::Connected) {
            return;
        }

        self.set_connection(ConnectionState::Connected).await;
        match self.api.server_info().await {
            Ok(info) => {
                info!(server = %info.server_version, docker = ?info.docker_version, "Connected to backend");
                let _ = self.ui_tx.send(UiEvent::ServerInfo(info)).await;
            }
            Err(e) => warn!(error = %e, "Failed to fetch server info"),
        }
    }

    async fn report_error(&mut self, context: &str, err: ClientError) {
        debug!(error = %err, context, "Fetch failed");

        if is_unreachable(&err) {
            self.set_connection(ConnectionState::Disconnected {
                retry_in: self.refresh_interval,
            })
            .await;
        }

        let _ = self
            .ui_tx
            .send(UiEvent::Error(format!("{}: {}", context, err.user_message())))
            .await;
    }

    async fn refresh_apps(&mut self) {
        match self.api.list_apps().await {
            Ok(apps) => {
                debug!(count = apps.len(), "Fetched apps");
                self.mark_connected().await;
                let _ = self.ui_tx.send(UiEvent::AppsUpdated(apps)).await;
            }
            Err(e) => self.report_error("Apps", e).await,
        }
    }

    /// Re-fetch one application. If it cannot be fetched (it may just have
    /// been removed) the whole list is refreshed instead.
    async fn refresh_app(&mut self, app_id: &AppId) {
        match self.api.get_app(app_id).await {
            Ok(app) => {
                debug!(app_id = %app_id, status = ?app.status, "Re-fetched app");
                self.mark_connected().await;
                let _ = self.ui_tx.send(UiEvent::AppUpdated(app)).await;
            }
            Err(e) if is_unreachable(&e) => self.report_error("App", e).await,
            Err(e) => {
                debug!(app_id = %app_id, error = %e, "Re-fetch failed, refreshing list");
                self.refresh_apps().await;
            }
        }
    }
}

/// Errors meaning the backend could not be reached at all.
fn is_unreachable(err: &ClientError) -> bool {
    matches!(err, ClientError::Http(_) | ClientError::Connection(_))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use onix_client::ServerInfo;
    use onix_core::{App, AppRunningStatus, OperationOutput};

    /// In-memory backend applying lifecycle operations to app statuses.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub apps: Mutex<HashMap<AppId, App>>,
        pub offline: Mutex<bool>,
        pub ops: Mutex<Vec<(ActionKind, AppId)>>,
    }

    impl FakeApi {
        pub fn with_app(app: App) -> Self {
            let api = Self::default();
            api.apps.lock().unwrap().insert(app.id.clone(), app);
            api
        }

        fn check_online(&self) -> Result<(), ClientError> {
            if *self.offline.lock().unwrap() {
                Err(ClientError::Connection("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl OnixApi for FakeApi {
        async fn list_apps(&self) -> Result<Vec<App>, ClientError> {
            self.check_online()?;
            let mut apps: Vec<App> = self.apps.lock().unwrap().values().cloned().collect();
            apps.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(apps)
        }

        async fn get_app(&self, id: &AppId) -> Result<App, ClientError> {
            self.check_online()?;
            self.apps
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| ClientError::GraphQl("Provided application ID was not found".into()))
        }

        async fn app_status(&self, id: &AppId) -> Result<AppRunningStatus, ClientError> {
            Ok(self.get_app(id).await?.status)
        }

        async fn run_operation(
            &self,
            kind: ActionKind,
            id: &AppId,
        ) -> Result<OperationOutput, ClientError> {
            self.check_online()?;
            self.ops.lock().unwrap().push((kind, id.clone()));

            let mut apps = self.apps.lock().unwrap();
            let app = apps
                .get_mut(id)
                .ok_or_else(|| ClientError::GraphQl("Provided application ID was not found".into()))?;

            let next = match kind {
                ActionKind::CreateContainers | ActionKind::Stop => AppRunningStatus::Stopped,
                ActionKind::Start => AppRunningStatus::FullyRunning,
                ActionKind::DestroyContainers => AppRunningStatus::NotCreated,
                ActionKind::Remove => {
                    apps.remove(id);
                    return Ok(OperationOutput::Unit);
                }
                ActionKind::GenerateTemplate => {
                    return Ok(OperationOutput::Template(format!("name: {}\n", app.name)));
                }
            };
            app.status = next;
            Ok(OperationOutput::Unit)
        }

        async fn server_info(&self) -> Result<ServerInfo, ClientError> {
            self.check_online()?;
            Ok(ServerInfo {
                server_version: "0.1.0".into(),
                docker_version: Some("24.0.7".into()),
            })
        }
    }

    async fn next_event<F>(rx: &mut mpsc::Receiver<UiEvent>, mut pred: F) -> UiEvent
    where
        F: FnMut(&UiEvent) -> bool,
    {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event = rx.recv().await.expect("backend hung up");
                if pred(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("timed out waiting for event")
    }

    fn start(api: Arc<FakeApi>) -> (mpsc::Sender<BackendCommand>, mpsc::Receiver<UiEvent>, tokio::task::JoinHandle<()>) {
        let (ui_tx, ui_rx) = mpsc::channel(100);
        let (cmd_tx, cmd_rx) = mpsc::channel(100);
        let handle = tokio::spawn(run_backend(api, Duration::from_secs(3600), ui_tx, cmd_rx));
        (cmd_tx, ui_rx, handle)
    }

    #[tokio::test]
    async fn test_initial_fetch_connects() {
        let api = Arc::new(FakeApi::with_app(App::new("a1", "blog", AppRunningStatus::NotCreated)));
        let (cmd_tx, mut ui_rx, handle) = start(api);

        next_event(&mut ui_rx, |e| {
            matches!(e, UiEvent::ConnectionStateChanged(ConnectionState::Connected))
        })
        .await;
        let info = next_event(&mut ui_rx, |e| matches!(e, UiEvent::ServerInfo(_))).await;
        assert!(matches!(info, UiEvent::ServerInfo(i) if i.server_version == "0.1.0"));

        match next_event(&mut ui_rx, |e| matches!(e, UiEvent::AppsUpdated(_))).await {
            UiEvent::AppsUpdated(apps) => assert_eq!(apps[0].name, "blog"),
            _ => unreachable!(),
        }

        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_operation_then_refresh() {
        let api = Arc::new(FakeApi::with_app(App::new("a1", "blog", AppRunningStatus::NotCreated)));
        let (cmd_tx, mut ui_rx, handle) = start(api.clone());
        next_event(&mut ui_rx, |e| matches!(e, UiEvent::AppsUpdated(_))).await;

        let op_id = OperationId::generate();
        cmd_tx
            .send(BackendCommand::RunOperation {
                op_id,
                app_id: AppId::new("a1"),
                kind: ActionKind::CreateContainers,
            })
            .await
            .unwrap();

        match next_event(&mut ui_rx, |e| matches!(e, UiEvent::OperationFinished { .. })).await {
            UiEvent::OperationFinished { op_id: id, outcome, .. } => {
                assert_eq!(id, op_id);
                assert_eq!(outcome, Ok(OperationOutput::Unit));
            }
            _ => unreachable!(),
        }

        cmd_tx.send(BackendCommand::RefreshApp(AppId::new("a1"))).await.unwrap();
        match next_event(&mut ui_rx, |e| matches!(e, UiEvent::AppUpdated(_))).await {
            UiEvent::AppUpdated(app) => assert_eq!(app.status, AppRunningStatus::Stopped),
            _ => unreachable!(),
        }

        assert_eq!(api.ops.lock().unwrap().len(), 1);
        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_operation_carries_backend_message() {
        let api = Arc::new(FakeApi::default());
        let (cmd_tx, mut ui_rx, handle) = start(api);

        cmd_tx
            .send(BackendCommand::RunOperation {
                op_id: OperationId::generate(),
                app_id: AppId::new("missing"),
                kind: ActionKind::Start,
            })
            .await
            .unwrap();

        match next_event(&mut ui_rx, |e| matches!(e, UiEvent::OperationFinished { .. })).await {
            UiEvent::OperationFinished { outcome: Err(e), .. } => {
                assert_eq!(e.message(), "Provided application ID was not found");
            }
            other => panic!("Expected failure, got {other:?}"),
        }

        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend_disconnects() {
        let api = Arc::new(FakeApi::default());
        *api.offline.lock().unwrap() = true;
        let (cmd_tx, mut ui_rx, handle) = start(api.clone());

        let event = next_event(&mut ui_rx, |e| {
            matches!(e, UiEvent::ConnectionStateChanged(ConnectionState::Disconnected { .. }))
        })
        .await;
        assert!(matches!(
            event,
            UiEvent::ConnectionStateChanged(ConnectionState::Disconnected { retry_in })
                if retry_in == Duration::from_secs(3600)
        ));

        *api.offline.lock().unwrap() = false;
        cmd_tx.send(BackendCommand::ForceReconnect).await.unwrap();
        next_event(&mut ui_rx, |e| {
            matches!(e, UiEvent::ConnectionStateChanged(ConnectionState::Connected))
        })
        .await;

        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_of_removed_app_falls_back_to_list() {
        let api = Arc::new(FakeApi::default());
        let (cmd_tx, mut ui_rx, handle) = start(api);
        next_event(&mut ui_rx, |e| matches!(e, UiEvent::AppsUpdated(_))).await;

        cmd_tx.send(BackendCommand::RefreshApp(AppId::new("gone"))).await.unwrap();
        match next_event(&mut ui_rx, |e| matches!(e, UiEvent::AppsUpdated(_))).await {
            UiEvent::AppsUpdated(apps) => assert!(apps.is_empty()),
            _ => unreachable!(),
        }

        cmd_tx.send(BackendCommand::Quit).await.unwrap();
        handle.await.unwrap();
    }
}
