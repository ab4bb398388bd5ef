//! Publisher ports: outbound notifications to the two downstream audiences.
//!
//! Each method hands one message to the bus. A returned error means the
//! message was not accepted; the application layer decides whether that is
//! fatal or degraded.

use std::future::Future;

use thingbridge_domain::error::ThingError;
use thingbridge_domain::id::{AuthToken, ThingId};
use thingbridge_domain::schema::SchemaEntry;
use thingbridge_domain::thing::{Data, Thing};

/// Sends outcomes and commands toward the client-facing channel.
///
/// The `err` argument of the outcome methods is the operation failure being
/// reported, or `None` on success.
pub trait ClientPublisher {
    fn send_registered(
        &self,
        id: &ThingId,
        token: Option<&AuthToken>,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_unregistered(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_schema_updated(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_auth_status(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_things_list(
        &self,
        things: &[Thing],
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    /// Ask the thing to report the given sensors.
    fn send_request_data(
        &self,
        id: &ThingId,
        sensor_ids: &[u32],
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    /// Ask the thing to apply the given values.
    fn send_update_data(
        &self,
        id: &ThingId,
        data: &[Data],
    ) -> impl Future<Output = Result<(), ThingError>> + Send;
}

/// Announces thing lifecycle changes toward the field connector.
pub trait ConnectorPublisher {
    fn send_registered(
        &self,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_schema_changed(
        &self,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    fn send_unregistered(&self, id: &ThingId) -> impl Future<Output = Result<(), ThingError>> + Send;
}

impl<T: ClientPublisher + Send + Sync> ClientPublisher for std::sync::Arc<T> {
    fn send_registered(
        &self,
        id: &ThingId,
        token: Option<&AuthToken>,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_registered(id, token, err)
    }

    fn send_unregistered(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_unregistered(id, err)
    }

    fn send_schema_updated(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_schema_updated(id, err)
    }

    fn send_auth_status(
        &self,
        id: &ThingId,
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_auth_status(id, err)
    }

    fn send_things_list(
        &self,
        things: &[Thing],
        err: Option<&ThingError>,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_things_list(things, err)
    }

    fn send_request_data(
        &self,
        id: &ThingId,
        sensor_ids: &[u32],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_request_data(id, sensor_ids)
    }

    fn send_update_data(
        &self,
        id: &ThingId,
        data: &[Data],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_update_data(id, data)
    }
}

impl<T: ConnectorPublisher + Send + Sync> ConnectorPublisher for std::sync::Arc<T> {
    fn send_registered(
        &self,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_registered(id, name)
    }

    fn send_schema_changed(
        &self,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_schema_changed(id, schema)
    }

    fn send_unregistered(&self, id: &ThingId) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).send_unregistered(id)
    }
}
