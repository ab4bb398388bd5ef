//! Thing service: use-cases driving the registry and the two publishers.
//!
//! Every operation runs its steps strictly in sequence and returns at most
//! one terminal error. Client notifications are part of the outcome;
//! connector notifications after a committed registry change are
//! best-effort and reported as a [`Delivery`].

use thingbridge_domain::error::{ThingError, ValidationError};
use thingbridge_domain::id::{AuthToken, ThingId};
use thingbridge_domain::schema::{self, SchemaEntry};
use thingbridge_domain::thing::{Data, Thing};

use crate::notify::{self, Delivery};
use crate::ports::{ClientPublisher, ConnectorPublisher, ThingRegistry};

/// Application service orchestrating thing commands.
pub struct ThingService<R, C, N> {
    registry: R,
    client: C,
    connector: N,
}

fn credentials(auth: &str, thing_id: &str) -> Result<(AuthToken, ThingId), ThingError> {
    let auth = AuthToken::new(auth)?;
    let id = ThingId::new(thing_id)?;
    Ok((auth, id))
}

impl<R, C, N> ThingService<R, C, N>
where
    R: ThingRegistry,
    C: ClientPublisher,
    N: ConnectorPublisher,
{
    /// Create a new service backed by the given registry and publishers.
    pub fn new(registry: R, client: C, connector: N) -> Self {
        Self {
            registry,
            client,
            connector,
        }
    }

    /// Register a new thing and hand its credential to the client.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing or malformed input, the
    /// registry error (folded with any notification failure) when creation
    /// fails, or [`ThingError::Notification`] when the client could not be
    /// told about the new thing.
    #[tracing::instrument(skip(self, auth))]
    pub async fn register(
        &self,
        auth: &str,
        thing_id: &str,
        name: &str,
    ) -> Result<Delivery, ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;
        id.validate_hardware_format()?;
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }

        let token = match self.registry.create(&auth, &id, name).await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(%err, "failed to create thing on registry");
                let sent = self.client.send_registered(&id, None, Some(&err)).await;
                return Err(notify::fold_failure(err, sent));
            }
        };
        tracing::info!("thing created on registry");

        notify::fold_success(self.client.send_registered(&id, Some(&token), None).await)?;

        Ok(Delivery::from_send(
            "registered",
            &id,
            self.connector.send_registered(&id, name).await,
        ))
    }

    /// Validate and persist a new schema, then notify the client and the
    /// connector.
    ///
    /// The registry write is not rolled back when the client notification
    /// fails afterwards; the caller sees the notification error.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing input,
    /// [`ThingError::SchemaInvalid`] when an entry breaks the rule table, the
    /// registry error when the update fails (each folded with any failure to
    /// notify the client), or [`ThingError::Notification`] when the success
    /// notification could not be sent.
    #[tracing::instrument(skip(self, auth, schema))]
    pub async fn update_schema(
        &self,
        auth: &str,
        thing_id: &str,
        schema: Option<Vec<SchemaEntry>>,
    ) -> Result<Delivery, ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;
        let schema = schema.ok_or(ValidationError::MissingSchema)?;

        if let Err(err) = schema::validate_schema(&schema) {
            tracing::warn!(%err, "rejecting schema");
            let sent = self.client.send_schema_updated(&id, Some(&err)).await;
            return Err(notify::fold_failure(err, sent));
        }
        tracing::info!("schema validated");

        if let Err(err) = self.registry.update_schema(&auth, &id, &schema).await {
            tracing::error!(%err, "failed to update schema on registry");
            let sent = self.client.send_schema_updated(&id, Some(&err)).await;
            return Err(notify::fold_failure(err, sent));
        }
        tracing::info!("schema updated");

        notify::fold_success(self.client.send_schema_updated(&id, None).await)?;
        tracing::info!("schema update sent to client");

        Ok(Delivery::from_send(
            "schema_changed",
            &id,
            self.connector.send_schema_changed(&id, &schema).await,
        ))
    }

    /// Ask a thing to report the selected sensors.
    ///
    /// The selection is checked against the schema fetched from the
    /// registry; an empty selection is forwarded as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing input, the registry
    /// error when the fetch fails, [`ThingError::NoSchema`] when the thing
    /// has no schema yet, [`ThingError::SensorInvalid`] for the first unknown
    /// sensor, or the publisher error when the command could not be sent.
    #[tracing::instrument(skip(self, auth))]
    pub async fn request_data(
        &self,
        auth: &str,
        thing_id: &str,
        sensor_ids: Option<Vec<u32>>,
    ) -> Result<(), ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;
        let sensor_ids = sensor_ids.ok_or(ValidationError::MissingSensors)?;

        let thing = self.fetch(&auth, &id).await?;
        let registered = thing
            .registered_schema()
            .inspect_err(|err| tracing::error!(%err, "cannot request data"))?;
        schema::validate_sensors(&sensor_ids, registered)
            .inspect_err(|err| tracing::error!(%err, "cannot request data"))?;

        self.client
            .send_request_data(&id, &sensor_ids)
            .await
            .inspect_err(|err| tracing::error!(%err, "failed to send data request"))?;

        tracing::info!("data request command sent");
        Ok(())
    }

    /// Ask a thing to apply new sensor values.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing input, the registry
    /// error when the fetch fails, [`ThingError::NoSchema`],
    /// [`ThingError::SensorInvalid`] or [`ThingError::DataInvalid`] when the
    /// batch does not fit the registered schema, or the publisher error when
    /// the command could not be sent.
    #[tracing::instrument(skip(self, auth, data))]
    pub async fn update_data(
        &self,
        auth: &str,
        thing_id: &str,
        data: Option<Vec<Data>>,
    ) -> Result<(), ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;
        let data = data.ok_or(ValidationError::MissingData)?;

        let thing = self.fetch(&auth, &id).await?;
        thing
            .validate_data(&data)
            .inspect_err(|err| tracing::error!(%err, "cannot update data"))?;

        self.client
            .send_update_data(&id, &data)
            .await
            .inspect_err(|err| tracing::error!(%err, "failed to send data update"))?;

        tracing::info!("data update command sent");
        Ok(())
    }

    /// Check the token grants access to the thing and report the verdict to
    /// the client.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing input, the registry
    /// error when access is denied, or [`ThingError::Notification`] when the
    /// verdict could not be sent.
    #[tracing::instrument(skip(self, auth))]
    pub async fn auth_thing(&self, auth: &str, thing_id: &str) -> Result<(), ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;

        let err = self.fetch(&auth, &id).await.err();
        let sent = self.client.send_auth_status(&id, err.as_ref()).await;
        notify::fold(err, sent).map_or(Ok(()), Err)
    }

    /// List the things visible to the token and send the list to the client.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] when the token is missing, the
    /// registry error when listing fails, or [`ThingError::Notification`]
    /// when the list could not be sent.
    #[tracing::instrument(skip(self, auth))]
    pub async fn list_things(&self, auth: &str) -> Result<Vec<Thing>, ThingError> {
        let auth = AuthToken::new(auth)?;

        match self.registry.list(&auth).await {
            Ok(things) => {
                notify::fold_success(self.client.send_things_list(&things, None).await)?;
                tracing::info!(count = things.len(), "things list sent");
                Ok(things)
            }
            Err(err) => {
                tracing::error!(%err, "failed to list things");
                let sent = self.client.send_things_list(&[], Some(&err)).await;
                Err(notify::fold_failure(err, sent))
            }
        }
    }

    /// Remove a thing from the registry, then notify the connector and the
    /// client.
    ///
    /// The connector only hears about removals that took effect.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::Validation`] for missing input, the registry
    /// error (folded with any failure to notify the client) when removal
    /// fails, or [`ThingError::Notification`] when the success notification
    /// could not be sent.
    #[tracing::instrument(skip(self, auth))]
    pub async fn unregister(&self, auth: &str, thing_id: &str) -> Result<Delivery, ThingError> {
        let (auth, id) = credentials(auth, thing_id)?;

        if let Err(err) = self.registry.remove(&auth, &id).await {
            tracing::error!(%err, "failed to remove thing from registry");
            let sent = self.client.send_unregistered(&id, Some(&err)).await;
            return Err(notify::fold_failure(err, sent));
        }
        tracing::info!("thing removed from registry");

        let delivery = Delivery::from_send(
            "unregistered",
            &id,
            self.connector.send_unregistered(&id).await,
        );

        notify::fold_success(self.client.send_unregistered(&id, None).await)?;
        Ok(delivery)
    }

    async fn fetch(&self, auth: &AuthToken, id: &ThingId) -> Result<Thing, ThingError> {
        self.registry
            .fetch(auth, id)
            .await
            .inspect_err(|err| tracing::error!(%err, "failed to fetch thing from registry"))
    }
}
