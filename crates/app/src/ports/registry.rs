//! Registry port: the authoritative store of thing records.
//!
//! Errors are opaque to the application layer: whatever the adapter returns
//! is passed through to the caller unchanged.

use std::future::Future;

use thingbridge_domain::error::ThingError;
use thingbridge_domain::id::{AuthToken, ThingId};
use thingbridge_domain::schema::SchemaEntry;
use thingbridge_domain::thing::Thing;

/// Proxy to the thing registry, acting on behalf of an authorization token.
pub trait ThingRegistry {
    /// Create a thing record and return the thing's own credential.
    fn create(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<AuthToken, ThingError>> + Send;

    /// Fetch the current record of a thing, schema included.
    fn fetch(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<Thing, ThingError>> + Send;

    /// List every thing visible to `auth`.
    fn list(&self, auth: &AuthToken) -> impl Future<Output = Result<Vec<Thing>, ThingError>> + Send;

    /// Replace the schema of a thing.
    fn update_schema(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send;

    /// Remove a thing record.
    fn remove(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<(), ThingError>> + Send;
}

impl<T: ThingRegistry + Send + Sync> ThingRegistry for std::sync::Arc<T> {
    fn create(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<AuthToken, ThingError>> + Send {
        (**self).create(auth, id, name)
    }

    fn fetch(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<Thing, ThingError>> + Send {
        (**self).fetch(auth, id)
    }

    fn list(&self, auth: &AuthToken) -> impl Future<Output = Result<Vec<Thing>, ThingError>> + Send {
        (**self).list(auth)
    }

    fn update_schema(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).update_schema(auth, id, schema)
    }

    fn remove(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        (**self).remove(auth, id)
    }
}
