//! GraphQL documents, response envelope and wire types.
//!
//! Wire types mirror the backend schema and are converted into the
//! `onix_core` model before leaving this crate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use onix_core::{
    ActionKind, App, AppContainer, AppId, AppRunningStatus, AppVolume, AppVolumeType, ContainerId,
    ContainerStatus, DockerContainer, EnvVar, PortBinding,
};

use crate::error::ClientError;

const APP_FIELDS: &str = r#"
fragment AppFields on App {
  id
  name
  fetchedStatus
  containers {
    id
    name
    image
    dependsOn
    envVars { name value }
    portBindings {
      hostPort { port portType }
      containerPort { port portType }
    }
    volumes {
      name
      variant {
        __typename
        ... on AppVolumeTypeExternalGraphQL { containerPath readonly }
        ... on AppVolumeTypeBindToPathGraphQL { realPath containerPath readonly }
      }
    }
    dockerContainer { dockerContainerId dockerContainerName status }
  }
}
"#;

pub const SERVER_INFO_QUERY: &str = "query ServerInfo { serverVersion dockerVersion }";

pub const APP_STATUS_QUERY: &str = "query AppStatus($id: String!) { appStatus(id: $id) }";

pub const GENERATE_TEMPLATE_QUERY: &str =
    "query GenerateTemplate($id: String!) { app(id: $id) { generateTemplate } }";

/// Query listing every application with its containers.
pub fn apps_query() -> String {
    format!("query Apps {{ apps {{ ...AppFields }} }}{}", APP_FIELDS)
}

/// Query fetching one application with its containers.
pub fn app_query() -> String {
    format!(
        "query App($id: String!) {{ app(id: $id) {{ ...AppFields }} }}{}",
        APP_FIELDS
    )
}

/// Name of the mutation field implementing `kind`, or `None` if the action
/// is served by a query.
pub fn mutation_field(kind: ActionKind) -> Option<&'static str> {
    match kind {
        ActionKind::CreateContainers => Some("createAppContainers"),
        ActionKind::Start => Some("startApp"),
        ActionKind::Stop => Some("stopApp"),
        ActionKind::DestroyContainers => Some("destroyAppContainers"),
        ActionKind::Remove => Some("removeApp"),
        ActionKind::GenerateTemplate => None,
    }
}

/// Mutation document for a `Void`-returning mutation taking an app id.
pub fn mutation_document(field: &str) -> String {
    format!("mutation Run($id: String!) {{ {}(id: $id) }}", field)
}

/// Body of a GraphQL request.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

/// One entry of the `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Turn the envelope into its `data` object.
    ///
    /// Any reported error fails the whole response, even when partial data
    /// came along with it.
    pub fn into_data(self) -> Result<Map<String, Value>, ClientError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(ClientError::GraphQl(messages.join("; ")));
        }

        self.data
            .ok_or_else(|| ClientError::MalformedResponse("response has no `data`".into()))
    }
}

/// Remove and return a top-level field of `data`.
///
/// Presence is what matters: a field holding `null` is returned as
/// `Value::Null`.
pub fn take_field(data: &mut Map<String, Value>, name: &str) -> Result<Value, ClientError> {
    data.remove(name)
        .ok_or_else(|| ClientError::MalformedResponse(format!("missing field `{}`", name)))
}

/// Decode a field value into `T`.
pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(ClientError::from)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireApp {
    id: AppId,
    name: String,
    fetched_status: AppRunningStatus,
    #[serde(default)]
    containers: Vec<WireContainer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContainer {
    id: String,
    name: String,
    image: String,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    env_vars: Vec<EnvVar>,
    #[serde(default)]
    port_bindings: Vec<PortBinding>,
    #[serde(default)]
    volumes: Vec<WireVolume>,
    docker_container: Option<WireDockerContainer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDockerContainer {
    docker_container_id: String,
    docker_container_name: String,
    status: ContainerStatus,
}

#[derive(Debug, Deserialize)]
struct WireVolume {
    name: String,
    variant: WireVolumeVariant,
}

/// Volume variants are a GraphQL union discriminated by `__typename`.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum WireVolumeVariant {
    #[serde(rename = "AppVolumeTypeDisposableGraphQL")]
    Disposable {},
    #[serde(rename = "AppVolumeTypeInternalGraphQL")]
    Internal {},
    #[serde(rename = "AppVolumeTypeExternalGraphQL", rename_all = "camelCase")]
    External {
        container_path: String,
        readonly: bool,
    },
    #[serde(rename = "AppVolumeTypeBindToPathGraphQL", rename_all = "camelCase")]
    BindToPath {
        real_path: String,
        container_path: String,
        readonly: bool,
    },
}

impl From<WireVolumeVariant> for AppVolumeType {
    fn from(variant: WireVolumeVariant) -> Self {
        match variant {
            WireVolumeVariant::Disposable {} => Self::Disposable,
            WireVolumeVariant::Internal {} => Self::Internal,
            WireVolumeVariant::External {
                container_path,
                readonly,
            } => Self::External {
                container_path,
                readonly,
            },
            WireVolumeVariant::BindToPath {
                real_path,
                container_path,
                readonly,
            } => Self::BindToPath {
                real_path,
                container_path,
                readonly,
            },
        }
    }
}

impl From<WireContainer> for AppContainer {
    fn from(wire: WireContainer) -> Self {
        Self {
            id: ContainerId::new(wire.id),
            name: wire.name,
            image: wire.image,
            env_vars: wire.env_vars,
            port_bindings: wire.port_bindings,
            volumes: wire
                .volumes
                .into_iter()
                .map(|v| AppVolume {
                    name: v.name,
                    variant: v.variant.into(),
                })
                .collect(),
            depends_on: wire.depends_on,
            docker_container: wire.docker_container.map(|d| DockerContainer {
                docker_container_id: d.docker_container_id,
                docker_container_name: d.docker_container_name,
                status: d.status,
            }),
        }
    }
}

impl From<WireApp> for App {
    fn from(wire: WireApp) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            containers: wire.containers.into_iter().map(Into::into).collect(),
            status: wire.fetched_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onix_core::{PortType, VolumeRow};
    use serde_json::json;

    fn envelope(value: Value) -> GraphQlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_errors_take_precedence_over_data() {
        let response = envelope(json!({
            "data": { "startApp": null },
            "errors": [{ "message": "first" }, { "message": "second" }]
        }));

        match response.into_data() {
            Err(ClientError::GraphQl(msg)) => assert_eq!(msg, "first; second"),
            other => panic!("Expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let response = envelope(json!({}));
        assert!(matches!(
            response.into_data(),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_null_field_is_present() {
        let mut data = envelope(json!({ "data": { "stopApp": null } }))
            .into_data()
            .unwrap();

        assert_eq!(take_field(&mut data, "stopApp").unwrap(), Value::Null);
        assert!(matches!(
            take_field(&mut data, "stopApp"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_app() {
        let wire: WireApp = decode(json!({
            "id": "4fR2b",
            "name": "blog",
            "fetchedStatus": "PARTIALLY_RUNNING",
            "containers": [{
                "id": "9Qa",
                "name": "db",
                "image": "postgres:16",
                "dependsOn": [],
                "envVars": [{ "name": "POSTGRES_DB", "value": "blog" }],
                "portBindings": [{
                    "hostPort": { "port": 5433, "portType": "TCP" },
                    "containerPort": { "port": 5432, "portType": "TCP" }
                }],
                "volumes": [
                    { "name": "cache", "variant": { "__typename": "AppVolumeTypeDisposableGraphQL", "_empty": null } },
                    { "name": "data", "variant": {
                        "__typename": "AppVolumeTypeBindToPathGraphQL",
                        "realPath": "/srv/blog",
                        "containerPath": "/var/lib/postgresql/data",
                        "readonly": false
                    } }
                ],
                "dockerContainer": {
                    "dockerContainerId": "a1b2",
                    "dockerContainerName": "onix-blog-db",
                    "status": "RUNNING"
                }
            }]
        }))
        .unwrap();

        let app: App = wire.into();
        assert_eq!(app.status, AppRunningStatus::PartiallyRunning);
        assert_eq!(app.running_containers(), 1);

        let db = &app.containers[0];
        assert_eq!(db.port_bindings[0].host_port.port_type, PortType::Tcp);
        assert_eq!(db.volumes[0].variant, AppVolumeType::Disposable);
        assert_eq!(
            db.volumes[1].row(),
            VolumeRow {
                name: "data",
                kind: "Bind to path",
                host_path: Some("/srv/blog"),
                container_path: Some("/var/lib/postgresql/data"),
                readonly: Some(false),
            }
        );
    }

    #[test]
    fn test_unknown_volume_variant_is_malformed() {
        let result: Result<WireVolume, _> = decode(json!({
            "name": "shared",
            "variant": { "__typename": "AppVolumeTypeGlobalPathGraphQL" }
        }));
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_volume_variant_missing_fields_is_malformed() {
        let result: Result<WireVolume, _> = decode(json!({
            "name": "data",
            "variant": { "__typename": "AppVolumeTypeExternalGraphQL", "readonly": true }
        }));
        assert!(matches!(result, Err(ClientError::MalformedResponse(_))));
    }

    #[test]
    fn test_every_mutation_is_named() {
        for kind in [
            ActionKind::CreateContainers,
            ActionKind::Start,
            ActionKind::Stop,
            ActionKind::DestroyContainers,
            ActionKind::Remove,
        ] {
            let field = mutation_field(kind).unwrap();
            assert!(mutation_document(field).contains(field));
        }
        assert_eq!(mutation_field(ActionKind::GenerateTemplate), None);
    }
}
