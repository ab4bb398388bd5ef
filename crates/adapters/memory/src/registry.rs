//! In-memory implementation of [`ThingRegistry`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use thingbridge_app::ports::ThingRegistry;
use thingbridge_domain::error::ThingError;
use thingbridge_domain::id::{AuthToken, ThingId};
use thingbridge_domain::schema::SchemaEntry;
use thingbridge_domain::thing::Thing;

use crate::error::MemoryError;

struct Record {
    owner: AuthToken,
    thing: Thing,
}

/// Registry keeping every thing in a process-local map.
///
/// Records are scoped to the token that created them: any other token is
/// refused access.
#[derive(Default)]
pub struct InMemoryThingRegistry {
    store: Mutex<HashMap<ThingId, Record>>,
}

impl InMemoryThingRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ThingId, Record>>, MemoryError> {
        self.store.lock().map_err(|_| MemoryError::Poisoned)
    }

    fn with_record<T>(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        f: impl FnOnce(&mut Record) -> T,
    ) -> Result<T, MemoryError> {
        let mut store = self.lock()?;
        let record = store
            .get_mut(id)
            .ok_or_else(|| MemoryError::NotFound(id.clone()))?;
        if record.owner != *auth {
            return Err(MemoryError::Forbidden(id.clone()));
        }
        Ok(f(record))
    }

    fn insert(&self, auth: &AuthToken, id: &ThingId, name: &str) -> Result<AuthToken, ThingError> {
        let mut store = self.lock()?;
        if store.contains_key(id) {
            return Err(MemoryError::AlreadyRegistered(id.clone()).into());
        }
        let token = AuthToken::new(uuid::Uuid::new_v4().simple().to_string())?;
        store.insert(
            id.clone(),
            Record {
                owner: auth.clone(),
                thing: Thing::new(id.clone(), name),
            },
        );
        tracing::debug!(thing_id = %id, "thing stored");
        Ok(token)
    }

    fn delete(&self, auth: &AuthToken, id: &ThingId) -> Result<(), MemoryError> {
        let mut store = self.lock()?;
        match store.get(id) {
            None => return Err(MemoryError::NotFound(id.clone())),
            Some(record) if record.owner != *auth => {
                return Err(MemoryError::Forbidden(id.clone()));
            }
            Some(_) => {}
        }
        store.remove(id);
        tracing::debug!(thing_id = %id, "thing removed");
        Ok(())
    }

    fn owned_by(&self, auth: &AuthToken) -> Result<Vec<Thing>, MemoryError> {
        let store = self.lock()?;
        let mut things: Vec<Thing> = store
            .values()
            .filter(|record| record.owner == *auth)
            .map(|record| record.thing.clone())
            .collect();
        things.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(things)
    }
}

impl ThingRegistry for InMemoryThingRegistry {
    fn create(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        name: &str,
    ) -> impl Future<Output = Result<AuthToken, ThingError>> + Send {
        let result = self.insert(auth, id, name);
        async move { result }
    }

    fn fetch(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<Thing, ThingError>> + Send {
        let result = self
            .with_record(auth, id, |record| record.thing.clone())
            .map_err(ThingError::from);
        async move { result }
    }

    fn list(&self, auth: &AuthToken) -> impl Future<Output = Result<Vec<Thing>, ThingError>> + Send {
        let result = self.owned_by(auth).map_err(ThingError::from);
        async move { result }
    }

    fn update_schema(
        &self,
        auth: &AuthToken,
        id: &ThingId,
        schema: &[SchemaEntry],
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        let result = self
            .with_record(auth, id, |record| {
                record.thing.schema = Some(schema.to_vec());
            })
            .map_err(ThingError::from);
        async move { result }
    }

    fn remove(
        &self,
        auth: &AuthToken,
        id: &ThingId,
    ) -> impl Future<Output = Result<(), ThingError>> + Send {
        let result = self.delete(auth, id).map_err(ThingError::from);
        async move { result }
    }
}
