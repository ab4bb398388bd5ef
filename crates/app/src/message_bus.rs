//! In-process message bus backed by a tokio broadcast channel.
//!
//! One bus carries [`ClientMessage`]s, another [`ConnectorMessage`]s; each
//! implements the matching publisher port.

use std::future::Future;

use tokio::sync::broadcast;

use thingbridge_domain::error::ThingError;
use thingbridge_domain::id::{AuthToken, ThingId};
use thingbridge_domain::message::{ClientMessage, ConnectorMessage, error_text};
use thingbridge_domain::schema::SchemaEntry;
use thingbridge_domain::thing::{Data, Thing};

use crate::ports::{ClientPublisher, ConnectorPublisher};

/// In-process bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the message is simply dropped).
pub struct InProcessBus<M> {
    sender: broadcast::Sender<M>,
}

impl<M: Clone> InProcessBus<M> {
    /// Create a new bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to messages on this bus.
    ///
    /// Returns a receiver that will get all messages published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<M> {
        self.sender.subscribe()
    }

    fn emit(&self, message: M) -> impl Future<Output = Result<(), ThingError>> + Send {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(message);
        async { Ok(()) }
    }
}

impl<M> Clone for InProcessBus<M> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl ClientPublisher for InProcessBus<ClientMessage> {
    fn send_registered(
        &self,
        id: &ThingId,
        token: Option<&AuthToken>,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::Registered {
            id: id.clone(),
            token: token.cloned(),
            error: error_text(err),
        })
    }

    fn send_unregistered(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::Unregistered {
            id: id.clone(),
            error: error_text(err),
        })
    }

    fn send_schema_updated(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::SchemaUpdated {
            id: id.clone(),
            error: error_text(err),
        })
    }

    fn send_auth_status(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::AuthStatus {
            id: id.clone(),
            error: error_text(err),
        })
    }

    fn send_things_list(
        &self,
        things: &[Thing],
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::ThingsList {
            things: things.to_vec(),
            error: error_text(err),
        })
    }

    fn send_request_data(
        &self,
        id: &ThingId,
        sensor_ids: &[u32],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::RequestData {
            id: id.clone(),
            sensor_ids: sensor_ids.to_vec(),
        })
    }

    fn send_update_data(
        &self,
        id: &ThingId,
        data: &[Data],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ClientMessage::UpdateData {
            id: id.clone(),
            data: data.to_vec(),
        })
    }
}

impl ConnectorPublisher for InProcessBus<ConnectorMessage> {
    fn send_registered(
        &self,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ConnectorMessage::Registered {
            id: id.clone(),
            name: name.to_string(),
        })
    }

    fn send_schema_changed(
        &self,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ConnectorMessage::SchemaChanged {
            id: id.clone(),
            schema: schema.to_vec(),
        })
    }

    fn send_unregistered(&self, id: &ThingId) -> impl Future<Output = Result<(), ThingError>> + Send {
        self.emit(ConnectorMessage::Unregistered { id: id.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thing_id() -> ThingId {
        ThingId::new("19cf40c23012ce1c").unwrap()
    }

    #[tokio::test]
    async fn should_deliver_client_message_to_subscriber() {
        let bus = InProcessBus::<ClientMessage>::new(16);
        let mut rx = bus.subscribe();

        bus.send_schema_updated(&thing_id(), Some(&ThingError::SchemaInvalid))
            .await
            .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(
            received,
            ClientMessage::SchemaUpdated {
                id: thing_id(),
                error: Some("invalid schema".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn should_deliver_connector_message_to_multiple_subscribers() {
        let bus = InProcessBus::<ConnectorMessage>::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.send_unregistered(&thing_id()).await.unwrap();

        let expected = ConnectorMessage::Unregistered { id: thing_id() };
        assert_eq!(rx1.recv().await.unwrap(), expected);
        assert_eq!(rx2.recv().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessBus::<ClientMessage>::new(16);
        let result = bus.send_request_data(&thing_id(), &[1, 2]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_share_channel_between_clones() {
        let bus = InProcessBus::<ConnectorMessage>::new(16);
        let clone = bus.clone();
        let mut rx = bus.subscribe();

        clone.send_registered(&thing_id(), "lamp").await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            ConnectorMessage::Registered {
                id: thing_id(),
                name: "lamp".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn should_not_deliver_messages_published_before_subscription() {
        let bus = InProcessBus::<ClientMessage>::new(16);
        bus.send_unregistered(&thing_id(), None).await.unwrap();

        let mut rx = bus.subscribe();
        bus.send_request_data(&thing_id(), &[0]).await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            ClientMessage::RequestData {
                id: thing_id(),
                sensor_ids: vec![0],
            }
        );
    }
}
