//! Raw records as delivered by the record system.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::changelog::null_as_empty;
use crate::error::Result;
use crate::fields::FieldId;
use crate::member::MemberId;
use crate::value::ValuePayload;

/// Declared type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Category,
    Text,
    #[serde(other)]
    Other,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Text => "text",
            Self::Other => "other",
        }
    }
}

/// One field of a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub field_id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Human-readable label shown in the record system.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub values: Vec<Value>,
}

impl RawField {
    /// Decodes the first value, if any.
    pub fn first_value(&self) -> Option<ValuePayload> {
        self.values.first().map(ValuePayload::decode)
    }
}

/// A member record in its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub item_id: MemberId,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

impl RawRecord {
    /// Parses a JSON array of records.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field(&self, field_id: FieldId) -> Option<&RawField> {
        self.fields.iter().find(|field| field.field_id == field_id)
    }
}
