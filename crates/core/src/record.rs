//! Raw table rows as returned by the table API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a table.
///
/// Depending on how the base is configured, attribute values arrive under
/// `fields` or under `data`; see [`crate::fields`] for lookups across both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Empty when the row came back without one.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl RawRecord {
    /// Build a record whose attributes live under `fields`.
    pub fn with_fields(id: impl Into<String>, fields: Value) -> Self {
        Self { id: id.into(), fields: object(fields), data: None }
    }

    /// Build a record whose attributes live under `data`.
    pub fn with_data(id: impl Into<String>, data: Value) -> Self {
        Self { id: id.into(), fields: None, data: object(data) }
    }
}

fn object(value: Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
