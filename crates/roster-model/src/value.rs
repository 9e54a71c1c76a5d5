//! Field value payloads.
//!
//! The record system embeds values in several shapes: category options are
//! objects with a display `text`, date values expose a `start` component and
//! plain text or numeric values are raw scalars. [`ValuePayload::decode`] is
//! the single place where those shapes are told apart.

use serde_json::Value;

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePayload {
    /// A categorical option, e.g. `{"value": {"id": 3, "text": "aktiv"}}`.
    Option { id: Option<i64>, text: String },
    /// A date value, e.g. `{"start": "2023-01-15 00:00:00"}`.
    Date { start: String },
    /// A raw scalar, e.g. `{"value": "Ada"}` or `{"value": 7}`.
    Scalar(String),
    /// Anything else (nulls, arrays, objects without a display text).
    Unknown,
}

impl ValuePayload {
    /// Decodes one element of a field's `values` array.
    pub fn decode(raw: &Value) -> Self {
        let Some(object) = raw.as_object() else {
            return Self::Unknown;
        };
        if let Some(inner) = object.get("value") {
            return match inner {
                Value::Object(option) => match option.get("text").and_then(Value::as_str) {
                    Some(text) => Self::Option {
                        id: option.get("id").and_then(Value::as_i64),
                        text: text.to_string(),
                    },
                    None => Self::Unknown,
                },
                Value::String(text) => Self::Scalar(text.clone()),
                Value::Number(number) => Self::Scalar(number.to_string()),
                _ => Self::Unknown,
            };
        }
        match object.get("start").and_then(Value::as_str) {
            Some(start) => Self::Date {
                start: start.to_string(),
            },
            None => Self::Unknown,
        }
    }

    /// Display string for option and scalar values.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Option { text, .. } => Some(text),
            Self::Scalar(text) => Some(text),
            Self::Date { .. } | Self::Unknown => None,
        }
    }

    /// Option id of a categorical value.
    pub fn option_id(&self) -> Option<i64> {
        match self {
            Self::Option { id, .. } => *id,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_category_option() {
        let payload = ValuePayload::decode(&json!({"value": {"id": 4, "text": "ausgetreten"}}));
        assert_eq!(
            payload,
            ValuePayload::Option {
                id: Some(4),
                text: "ausgetreten".to_string()
            }
        );
        assert_eq!(payload.display_text(), Some("ausgetreten"));
        assert_eq!(payload.option_id(), Some(4));
    }

    #[test]
    fn decodes_raw_scalars() {
        assert_eq!(
            ValuePayload::decode(&json!({"value": "Ada"})).display_text(),
            Some("Ada")
        );
        assert_eq!(
            ValuePayload::decode(&json!({"value": 12})).display_text(),
            Some("12")
        );
    }

    #[test]
    fn decodes_date_start() {
        let payload = ValuePayload::decode(&json!({"start": "2023-01-15 00:00:00", "end": null}));
        assert_eq!(
            payload,
            ValuePayload::Date {
                start: "2023-01-15 00:00:00".to_string()
            }
        );
        assert_eq!(payload.display_text(), None);
    }

    #[test]
    fn unknown_shapes() {
        assert_eq!(ValuePayload::decode(&json!("bare")), ValuePayload::Unknown);
        assert_eq!(
            ValuePayload::decode(&json!({"value": {"id": 1}})),
            ValuePayload::Unknown
        );
        assert_eq!(
            ValuePayload::decode(&json!({"value": null})),
            ValuePayload::Unknown
        );
        assert_eq!(ValuePayload::decode(&json!({"start": null})), ValuePayload::Unknown);
    }
}
