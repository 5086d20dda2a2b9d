//! Forward conversion: TypedValue → JSON value.
//!
//! Decimals are written as strings to preserve precision, binary data as
//! base64 and instants as RFC 3339.

use base64::Engine;
use column_core::{DecodedRow, TypedValue};
use serde_json::json;

/// Wrapper for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<TypedValue> for JsonValue {
    fn from(tv: TypedValue) -> Self {
        match tv {
            TypedValue::Text(s) => JsonValue(json!(s)),
            TypedValue::Boolean(b) => JsonValue(json!(b)),
            TypedValue::Integer(i) => JsonValue(json!(i)),
            // NaN and infinities have no JSON number form
            TypedValue::Float(f) => JsonValue(
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            ),
            TypedValue::Bytes(b) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(b);
                JsonValue(json!(encoded))
            }
            TypedValue::Instant(dt) => JsonValue(json!(dt.to_rfc3339())),
            TypedValue::Decimal(d) => JsonValue(json!(d.to_string())),
        }
    }
}

impl From<Option<TypedValue>> for JsonValue {
    fn from(tv: Option<TypedValue>) -> Self {
        tv.map_or(JsonValue(serde_json::Value::Null), JsonValue::from)
    }
}

/// Render a decoded row as a JSON object keyed by field name.
pub fn decoded_row_to_json(row: &DecodedRow) -> serde_json::Value {
    let map = row
        .fields
        .iter()
        .map(|(name, value)| (name.clone(), JsonValue::from(value.clone()).into_inner()))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}
