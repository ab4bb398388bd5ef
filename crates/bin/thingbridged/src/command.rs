//! Intake commands read from stdin, one JSON object per line.

use serde::Deserialize;

use thingbridge_app::ports::{ClientPublisher, ConnectorPublisher, ThingRegistry};
use thingbridge_app::services::thing_service::ThingService;
use thingbridge_domain::error::ThingError;
use thingbridge_domain::schema::SchemaEntry;
use thingbridge_domain::thing::Data;

/// A request for one of the service operations.
///
/// Missing credentials deserialize as empty strings so they are rejected by
/// the service with a validation error rather than dropped as malformed.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Register {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
    },
    UpdateSchema {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
        schema: Option<Vec<SchemaEntry>>,
    },
    RequestData {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
        sensor_ids: Option<Vec<u32>>,
    },
    UpdateData {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
        data: Option<Vec<Data>>,
    },
    AuthThing {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
    },
    ListThings {
        #[serde(default)]
        auth: String,
    },
    Unregister {
        #[serde(default)]
        auth: String,
        #[serde(default)]
        id: String,
    },
}

impl Command {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Register { .. } => "register",
            Self::UpdateSchema { .. } => "update_schema",
            Self::RequestData { .. } => "request_data",
            Self::UpdateData { .. } => "update_data",
            Self::AuthThing { .. } => "auth_thing",
            Self::ListThings { .. } => "list_things",
            Self::Unregister { .. } => "unregister",
        }
    }
}

/// Run a command against the service.
///
/// Degraded connector deliveries are already logged by the service and do
/// not fail the command.
///
/// # Errors
///
/// Returns the terminal error of the dispatched operation.
pub async fn dispatch<R, C, N>(
    service: &ThingService<R, C, N>,
    command: Command,
) -> Result<(), ThingError>
where
    R: ThingRegistry,
    C: ClientPublisher,
    N: ConnectorPublisher,
{
    match command {
        Command::Register { auth, id, name } => {
            service.register(&auth, &id, &name).await.map(drop)
        }
        Command::UpdateSchema { auth, id, schema } => {
            service.update_schema(&auth, &id, schema).await.map(drop)
        }
        Command::RequestData {
            auth,
            id,
            sensor_ids,
        } => service.request_data(&auth, &id, sensor_ids).await,
        Command::UpdateData { auth, id, data } => service.update_data(&auth, &id, data).await,
        Command::AuthThing { auth, id } => service.auth_thing(&auth, &id).await,
        Command::ListThings { auth } => service.list_things(&auth).await.map(drop),
        Command::Unregister { auth, id } => service.unregister(&auth, &id).await.map(drop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use thingbridge_adapter_memory::InMemoryThingRegistry;
    use thingbridge_app::message_bus::InProcessBus;
    use thingbridge_domain::error::ValidationError;
    use thingbridge_domain::message::{ClientMessage, ConnectorMessage};

    type Service = ThingService<
        InMemoryThingRegistry,
        InProcessBus<ClientMessage>,
        InProcessBus<ConnectorMessage>,
    >;

    fn service() -> (Service, InProcessBus<ClientMessage>) {
        let client = InProcessBus::new(16);
        let service = ThingService::new(
            InMemoryThingRegistry::new(),
            client.clone(),
            InProcessBus::new(16),
        );
        (service, client)
    }

    fn parse(value: serde_json::Value) -> Command {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_parse_update_schema_command() {
        let command = parse(json!({
            "type": "update_schema",
            "auth": "token",
            "id": "abc",
            "schema": [
                {"sensorId": 0, "typeId": 65521, "valueType": 3, "unit": 0, "name": "LED"}
            ]
        }));

        let Command::UpdateSchema { schema, .. } = &command else {
            panic!("expected update_schema, got {command:?}");
        };
        assert_eq!(schema.as_ref().map(Vec::len), Some(1));
        assert_eq!(command.kind(), "update_schema");
    }

    #[test]
    fn should_parse_absent_selection_as_none() {
        let command = parse(json!({"type": "request_data", "auth": "t", "id": "abc"}));

        let Command::RequestData { sensor_ids, .. } = &command else {
            panic!("expected request_data, got {command:?}");
        };
        assert!(sensor_ids.is_none());
    }

    #[test]
    fn should_reject_unknown_command_type() {
        let result = serde_json::from_value::<Command>(json!({"type": "reboot"}));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn should_reject_command_without_credentials() {
        let (service, _) = service();

        let result = dispatch(&service, parse(json!({"type": "unregister", "id": "abc"}))).await;

        assert!(matches!(
            result,
            Err(ThingError::Validation(ValidationError::MissingAuthorization))
        ));
    }

    #[tokio::test]
    async fn should_dispatch_register_then_list() {
        let (service, client) = service();
        let mut rx = client.subscribe();

        dispatch(
            &service,
            parse(json!({"type": "register", "auth": "user", "id": "a1", "name": "lamp"})),
        )
        .await
        .unwrap();
        dispatch(&service, parse(json!({"type": "list_things", "auth": "user"})))
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            ClientMessage::Registered { token: Some(_), error: None, .. }
        ));
        let ClientMessage::ThingsList { things, error } = rx.recv().await.unwrap() else {
            panic!("expected things list");
        };
        assert!(error.is_none());
        assert_eq!(things.len(), 1);
        assert_eq!(things[0].name, "lamp");
    }

    #[tokio::test]
    async fn should_surface_service_errors() {
        let (service, _) = service();

        let result = dispatch(
            &service,
            parse(json!({"type": "request_data", "auth": "user", "id": "a1", "sensor_ids": [0]})),
        )
        .await;

        assert!(matches!(result, Err(ThingError::NotFound(_))));
    }
}
