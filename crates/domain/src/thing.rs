//! Thing: the registry record of one physical device.

use serde::{Deserialize, Serialize};

use crate::error::ThingError;
use crate::id::ThingId;
use crate::schema::{self, SchemaEntry};

/// A registered thing as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thing {
    pub id: ThingId,
    pub name: String,
    /// `None` until the thing publishes its first schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<SchemaEntry>>,
}

impl Thing {
    /// A freshly registered thing without schema.
    #[must_use]
    pub fn new(id: ThingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            schema: None,
        }
    }

    /// The registered schema, required to be present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::NoSchema`] when the thing has not published
    /// any channel yet.
    pub fn registered_schema(&self) -> Result<&[SchemaEntry], ThingError> {
        match self.schema.as_deref() {
            Some(schema) if !schema.is_empty() => Ok(schema),
            _ => Err(ThingError::NoSchema(self.id.clone())),
        }
    }

    /// Check a data batch against the registered schema: every sensor must
    /// exist and every value must fit that sensor's value type.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::NoSchema`], [`ThingError::SensorInvalid`] or
    /// [`ThingError::DataInvalid`] for the first offending item.
    pub fn validate_data(&self, data: &[Data]) -> Result<(), ThingError> {
        let schema = self.registered_schema()?;
        for item in data {
            let entry = schema::find_sensor(schema, item.sensor_id)
                .ok_or(ThingError::SensorInvalid(item.sensor_id))?;
            if !entry.kind().is_some_and(|kind| kind.accepts(&item.value)) {
                return Err(ThingError::DataInvalid(item.sensor_id));
            }
        }
        Ok(())
    }
}

/// A value addressed to one sensor of a thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Data {
    pub sensor_id: u32,
    pub value: serde_json::Value,
}
