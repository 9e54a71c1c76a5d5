//! Record revision history.
//!
//! The record system returns revisions as
//! `{"revision", "created_on", "data": {"fields": [...]}}`. Entries are kept
//! in delivery order; nothing in this crate re-sorts them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::fields::FieldId;
use crate::value::ValuePayload;

/// Old and new values of one field in a single revision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub field_id: FieldId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub old_values: Vec<Value>,
    #[serde(default, rename = "values", deserialize_with = "null_as_empty")]
    pub new_values: Vec<Value>,
}

impl FieldDelta {
    /// True when both sides of the delta carry at least one value.
    pub fn has_both_sides(&self) -> bool {
        !self.old_values.is_empty() && !self.new_values.is_empty()
    }

    pub fn old_value(&self) -> Option<ValuePayload> {
        self.old_values.first().map(ValuePayload::decode)
    }

    pub fn new_value(&self) -> Option<ValuePayload> {
        self.new_values.first().map(ValuePayload::decode)
    }
}

/// One revision of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireEntry", into = "WireEntry")]
pub struct ChangeLogEntry {
    pub revision: Option<i64>,
    /// Creation timestamp as delivered (parsed by the transform stage).
    pub created_on: Option<String>,
    pub deltas: Vec<FieldDelta>,
}

impl ChangeLogEntry {
    /// Parses a JSON array of revisions.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Deltas touching the given field, in delivery order.
    pub fn deltas_for(&self, field_id: FieldId) -> impl Iterator<Item = &FieldDelta> {
        self.deltas
            .iter()
            .filter(move |delta| delta.field_id == field_id)
    }
}

#[derive(Serialize, Deserialize)]
struct WireEntry {
    #[serde(default)]
    revision: Option<i64>,
    #[serde(default)]
    created_on: Option<String>,
    #[serde(default)]
    data: Option<WireData>,
}

#[derive(Default, Serialize, Deserialize)]
struct WireData {
    #[serde(default, deserialize_with = "null_as_empty")]
    fields: Vec<FieldDelta>,
}

/// Reads a JSON `null` list as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<WireEntry> for ChangeLogEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            revision: wire.revision,
            created_on: wire.created_on,
            deltas: wire.data.unwrap_or_default().fields,
        }
    }
}

impl From<ChangeLogEntry> for WireEntry {
    fn from(entry: ChangeLogEntry) -> Self {
        Self {
            revision: entry.revision,
            created_on: entry.created_on,
            data: Some(WireData {
                fields: entry.deltas,
            }),
        }
    }
}
