//! Schema: the sensor and actuator channels a thing declares.
//!
//! Each [`SchemaEntry`] is typed by a `(type_id, value_type, unit)` triple
//! that must satisfy the [`rules`] table before the schema may reach the
//! registry.

pub mod rules;

use serde::{Deserialize, Serialize};

use crate::error::ThingError;

/// Longest display name a schema entry may carry, in characters.
pub const MAX_NAME_LEN: usize = 23;

/// Representation of the values a sensor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ValueType {
    Int = 1,
    Float = 2,
    Bool = 3,
    Raw = 4,
}

impl ValueType {
    /// Decode a wire code; `None` for codes outside the protocol.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Int),
            2 => Some(Self::Float),
            3 => Some(Self::Bool),
            4 => Some(Self::Raw),
            _ => None,
        }
    }

    /// The wire code for this value type.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Whether a JSON value can carry a reading of this type.
    ///
    /// Raw payloads travel as (base64) strings.
    #[must_use]
    pub fn accepts(self, value: &serde_json::Value) -> bool {
        match self {
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Raw => value.is_string(),
        }
    }
}

/// One declared channel of a thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntry {
    pub sensor_id: u32,
    pub type_id: u32,
    pub value_type: u32,
    pub unit: u32,
    pub name: String,
}

impl SchemaEntry {
    /// Whether the entry satisfies the rule table and the name bound.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.name.chars().count() <= MAX_NAME_LEN
            && rules::is_valid_value_type(self.type_id, self.value_type)
            && rules::is_valid_unit(self.type_id, self.unit)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ThingError::SchemaInvalid`] when [`is_valid`](Self::is_valid)
    /// is false.
    pub fn validate(&self) -> Result<(), ThingError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ThingError::SchemaInvalid)
        }
    }

    /// The decoded value type, if the code is known.
    #[must_use]
    pub fn kind(&self) -> Option<ValueType> {
        ValueType::from_code(self.value_type)
    }
}

/// Validate every entry of a schema list, stopping at the first violation.
///
/// # Errors
///
/// Returns [`ThingError::SchemaInvalid`] if any entry is invalid.
pub fn validate_schema(schema: &[SchemaEntry]) -> Result<(), ThingError> {
    schema.iter().try_for_each(SchemaEntry::validate)
}

/// Find the entry declaring `sensor_id`.
#[must_use]
pub fn find_sensor(schema: &[SchemaEntry], sensor_id: u32) -> Option<&SchemaEntry> {
    schema.iter().find(|entry| entry.sensor_id == sensor_id)
}

/// Check every id in `sensor_ids` is declared in `schema`.
///
/// An empty selection is vacuously valid.
///
/// # Errors
///
/// Returns [`ThingError::SensorInvalid`] with the first unknown id.
pub fn validate_sensors(sensor_ids: &[u32], schema: &[SchemaEntry]) -> Result<(), ThingError> {
    match sensor_ids
        .iter()
        .find(|id| find_sensor(schema, **id).is_none())
    {
        Some(id) => Err(ThingError::SensorInvalid(*id)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch(sensor_id: u32) -> SchemaEntry {
        SchemaEntry {
            sensor_id,
            type_id: 0xFFF1,
            value_type: 3,
            unit: 0,
            name: "LED".to_string(),
        }
    }

    #[test]
    fn should_accept_valid_switch_entry() {
        assert!(switch(0).is_valid());
    }

    #[test]
    fn should_reject_entry_with_wrong_unit() {
        let mut entry = switch(0);
        entry.unit = 5;
        assert!(!entry.is_valid());
        assert!(matches!(entry.validate(), Err(ThingError::SchemaInvalid)));
    }

    #[test]
    fn should_reject_entry_with_wrong_value_type() {
        let mut entry = switch(0);
        entry.value_type = 1;
        assert!(!entry.is_valid());
    }

    #[test]
    fn should_reject_entry_with_unknown_type_id() {
        let mut entry = switch(0);
        entry.type_id = 79_999;
        assert!(!entry.is_valid());
    }

    #[test]
    fn should_accept_name_at_bound() {
        let mut entry = switch(0);
        entry.name = "a".repeat(MAX_NAME_LEN);
        assert!(entry.is_valid());
    }

    #[test]
    fn should_reject_name_over_bound() {
        let mut entry = switch(0);
        entry.name = "SchemaNameGreaterThan23Characters".to_string();
        assert!(!entry.is_valid());
    }

    #[test]
    fn should_count_name_length_in_characters() {
        let mut entry = switch(0);
        entry.name = "é".repeat(MAX_NAME_LEN);
        assert!(entry.is_valid());
    }

    #[test]
    fn should_accept_empty_schema_list() {
        assert!(validate_schema(&[]).is_ok());
    }

    #[test]
    fn should_reject_list_when_any_entry_is_invalid() {
        let mut bad = switch(1);
        bad.unit = 12345;
        let result = validate_schema(&[switch(0), bad]);
        assert!(matches!(result, Err(ThingError::SchemaInvalid)));
    }

    #[test]
    fn should_report_first_unknown_sensor() {
        let schema = [switch(0), switch(1), switch(2)];
        let result = validate_sensors(&[1, 5, 7], &schema);
        assert!(matches!(result, Err(ThingError::SensorInvalid(5))));
    }

    #[test]
    fn should_accept_known_sensors() {
        let schema = [switch(0), switch(1), switch(2)];
        assert!(validate_sensors(&[2, 0], &schema).is_ok());
    }

    #[test]
    fn should_accept_empty_sensor_selection() {
        let schema = [switch(0)];
        assert!(validate_sensors(&[], &schema).is_ok());
    }

    #[test]
    fn should_match_json_values_to_value_types() {
        assert!(ValueType::Int.accepts(&serde_json::json!(42)));
        assert!(!ValueType::Int.accepts(&serde_json::json!(4.2)));
        assert!(ValueType::Float.accepts(&serde_json::json!(4.2)));
        assert!(ValueType::Float.accepts(&serde_json::json!(4)));
        assert!(ValueType::Bool.accepts(&serde_json::json!(true)));
        assert!(!ValueType::Bool.accepts(&serde_json::json!(1)));
        assert!(ValueType::Raw.accepts(&serde_json::json!("AQI=")));
    }

    #[test]
    fn should_deserialize_camel_case_fields() {
        let json = r#"{"sensorId":0,"typeId":65521,"valueType":3,"unit":0,"name":"LED"}"#;
        let entry: SchemaEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry, switch(0));
    }
}
