//! GraphQL-over-HTTP client for the Onix backend.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use onix_core::{ActionKind, App, AppId, AppRunningStatus, OperationOutput};

use crate::api::{OnixApi, ServerInfo};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::graphql::{self, GraphQlRequest, GraphQlResponse, WireApp};

/// Client for the backend's GraphQL endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OnixClient {
    inner: reqwest::Client,
    endpoint: String,
}

impl OnixClient {
    /// Create a new client from its configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        Ok(Self {
            inner,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one GraphQL document and return the `data` object.
    async fn execute(&self, query: &str, variables: Value) -> Result<Map<String, Value>, ClientError> {
        let url = format!("{}/", self.endpoint);
        debug!(url = %url, "GraphQL request");

        let response = self
            .inner
            .post(&url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!(status = %status, "GraphQL request rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let envelope: GraphQlResponse = serde_json::from_slice(&body)?;
        envelope.into_data()
    }

    /// Run a query and decode one of its top-level fields.
    async fn query_field<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, ClientError> {
        let mut data = self.execute(query, variables).await?;
        graphql::decode(graphql::take_field(&mut data, field)?)
    }

    async fn generate_template(&self, id: &AppId) -> Result<String, ClientError> {
        let app: Value = self
            .query_field(graphql::GENERATE_TEMPLATE_QUERY, json!({ "id": id }), "app")
            .await?;

        match app.get("generateTemplate") {
            Some(Value::String(template)) => Ok(template.clone()),
            Some(other) => Err(ClientError::MalformedResponse(format!(
                "`generateTemplate` is not a string: {}",
                other
            ))),
            None => Err(ClientError::MalformedResponse(
                "missing field `generateTemplate`".into(),
            )),
        }
    }
}

#[async_trait]
impl OnixApi for OnixClient {
    async fn list_apps(&self) -> Result<Vec<App>, ClientError> {
        let apps: Vec<WireApp> = self
            .query_field(&graphql::apps_query(), json!({}), "apps")
            .await?;
        debug!(count = apps.len(), "Fetched apps");
        Ok(apps.into_iter().map(Into::into).collect())
    }

    async fn get_app(&self, id: &AppId) -> Result<App, ClientError> {
        let app: WireApp = self
            .query_field(&graphql::app_query(), json!({ "id": id }), "app")
            .await?;
        Ok(app.into())
    }

    async fn app_status(&self, id: &AppId) -> Result<AppRunningStatus, ClientError> {
        self.query_field(graphql::APP_STATUS_QUERY, json!({ "id": id }), "appStatus")
            .await
    }

    async fn run_operation(
        &self,
        kind: ActionKind,
        id: &AppId,
    ) -> Result<OperationOutput, ClientError> {
        debug!(app_id = %id, kind = ?kind, "Running operation");

        let Some(field) = graphql::mutation_field(kind) else {
            return self.generate_template(id).await.map(OperationOutput::Template);
        };

        let mut data = self
            .execute(&graphql::mutation_document(field), json!({ "id": id }))
            .await?;
        // Mutations return `Void`, serialized as null: presence is success.
        graphql::take_field(&mut data, field)?;
        Ok(OperationOutput::Unit)
    }

    async fn server_info(&self) -> Result<ServerInfo, ClientError> {
        let mut data = self.execute(graphql::SERVER_INFO_QUERY, json!({})).await?;
        Ok(ServerInfo {
            server_version: graphql::decode(graphql::take_field(&mut data, "serverVersion")?)?,
            docker_version: graphql::decode(graphql::take_field(&mut data, "dockerVersion")?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::routing::post;
    use axum::{Json, Router};

    type Seen = Arc<Mutex<Vec<Value>>>;

    /// Serve `reply` for every request and record the request bodies.
    async fn serve(reply: Value) -> (OnixClient, Seen) {
        let seen: Seen = Arc::default();
        let recorder = seen.clone();

        let app = Router::new().route(
            "/",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(body);
                    Json(reply)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ClientConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(5));
        (OnixClient::new(&config).unwrap(), seen)
    }

    #[tokio::test]
    async fn test_list_apps() {
        let (client, seen) = serve(json!({
            "data": { "apps": [
                { "id": "a1", "name": "blog", "fetchedStatus": "NOT_CREATED", "containers": [] },
                { "id": "a2", "name": "wiki", "fetchedStatus": "FULLY_RUNNING", "containers": [] }
            ] }
        }))
        .await;

        let apps = client.list_apps().await.unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].status, AppRunningStatus::NotCreated);
        assert_eq!(apps[1].name, "wiki");

        let request = &seen.lock().unwrap()[0];
        assert!(request["query"].as_str().unwrap().contains("fetchedStatus"));
    }

    #[tokio::test]
    async fn test_mutation_with_null_payload_succeeds() {
        let (client, seen) = serve(json!({ "data": { "createAppContainers": null } })).await;

        let output = client
            .run_operation(ActionKind::CreateContainers, &AppId::new("a1"))
            .await
            .unwrap();
        assert_eq!(output, OperationOutput::Unit);

        let request = &seen.lock().unwrap()[0];
        assert_eq!(request["variables"]["id"], "a1");
        assert!(request["query"]
            .as_str()
            .unwrap()
            .contains("createAppContainers(id: $id)"));
    }

    #[tokio::test]
    async fn test_mutation_without_its_field_is_malformed() {
        let (client, _) = serve(json!({ "data": {} })).await;

        let err = client
            .run_operation(ActionKind::Stop, &AppId::new("a1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_backend_error_message_is_passed_through() {
        let (client, _) = serve(json!({
            "data": null,
            "errors": [{ "message": "Provided application ID was not found" }]
        }))
        .await;

        let err = client
            .run_operation(ActionKind::Start, &AppId::new("zz"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Provided application ID was not found");

        let op_err: onix_core::OperationError = err.into();
        assert_eq!(op_err.message(), "Provided application ID was not found");
    }

    #[tokio::test]
    async fn test_generate_template() {
        let (client, _) = serve(json!({
            "data": { "app": { "generateTemplate": "name: blog\ncontainers: []\n" } }
        }))
        .await;

        let output = client
            .run_operation(ActionKind::GenerateTemplate, &AppId::new("a1"))
            .await
            .unwrap();
        assert_eq!(
            output,
            OperationOutput::Template("name: blog\ncontainers: []\n".into())
        );
    }

    #[tokio::test]
    async fn test_server_info() {
        let (client, _) = serve(json!({
            "data": { "serverVersion": "0.1.0", "dockerVersion": null }
        }))
        .await;

        let info = client.server_info().await.unwrap();
        assert_eq!(info.server_version, "0.1.0");
        assert_eq!(info.docker_version, None);
    }

    #[tokio::test]
    async fn test_app_status() {
        let (client, _) = serve(json!({ "data": { "appStatus": "ZOMBIE" } })).await;

        let status = client.app_status(&AppId::new("a1")).await.unwrap();
        assert_eq!(status, AppRunningStatus::Zombie);
    }
}
