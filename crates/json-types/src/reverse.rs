//! Reverse conversion: JSON value → ColumnValue.
//!
//! JSON has no binary, decimal or timestamp types, so rows exported as JSON
//! carry them as single-key tagged objects:
//!
//! ```json
//! {"p_image": {"$binary": "3q2+7w=="},
//!  "p_price": {"$decimal": "12.50"},
//!  "p_created_at": {"$timestamp": "2024-01-01T12:00:00Z"}}
//! ```
//!
//! Everything else maps to the closest driver-style runtime type; the
//! column converter then coerces it to the field's target type.

use base64::Engine;
use chrono::{DateTime, NaiveDateTime, Utc};
use column_core::{ColumnValue, InternalRow};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Tag for base64 encoded binary data.
pub const BINARY_TAG: &str = "$binary";
/// Tag for decimal strings.
pub const DECIMAL_TAG: &str = "$decimal";
/// Tag for timestamps.
pub const TIMESTAMP_TAG: &str = "$timestamp";

/// Errors that can occur during JSON to ColumnValue conversion.
#[derive(Debug, Error)]
pub enum JsonRowError {
    /// A row must be a JSON object
    #[error("Expected a JSON object for a row, got {0}")]
    NotAnObject(&'static str),

    /// Arrays and untagged objects have no column representation
    #[error("Unsupported JSON value for column '{column}': {kind}")]
    UnsupportedValue { column: String, kind: &'static str },

    /// Invalid base64 in a `$binary` value
    #[error("Invalid base64 for column '{column}': {source}")]
    InvalidBase64 {
        column: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Invalid `$decimal` value
    #[error("Invalid decimal for column '{column}': {value}")]
    InvalidDecimal { column: String, value: String },

    /// Invalid `$timestamp` value
    #[error("Invalid timestamp for column '{column}': {value}")]
    InvalidTimestamp { column: String, value: String },
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Parse a timestamp string.
///
/// Supports:
/// - RFC 3339: "2024-01-01T12:00:00Z" → `Timestamp`
/// - SQL timestamp: "2024-01-01 12:00:00" → `LocalTimestamp`
/// - SQL timestamp with fraction: "2024-01-01 12:00:00.123456" → `LocalTimestamp`
fn parse_timestamp(s: &str) -> Option<ColumnValue> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ColumnValue::Timestamp(dt.with_timezone(&Utc)));
    }

    // %.f also accepts an absent fraction
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ColumnValue::LocalTimestamp(naive));
    }

    None
}

fn tagged_to_column_value(
    column: &str,
    tag: &str,
    payload: &serde_json::Value,
) -> Result<ColumnValue, JsonRowError> {
    let unsupported = || JsonRowError::UnsupportedValue {
        column: column.to_string(),
        kind: "object",
    };
    let payload = payload.as_str().ok_or_else(unsupported)?;

    match tag {
        BINARY_TAG => base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map(ColumnValue::Bytes)
            .map_err(|source| JsonRowError::InvalidBase64 {
                column: column.to_string(),
                source,
            }),
        DECIMAL_TAG => Decimal::from_str(payload)
            .map(ColumnValue::Decimal)
            .map_err(|_| JsonRowError::InvalidDecimal {
                column: column.to_string(),
                value: payload.to_string(),
            }),
        TIMESTAMP_TAG => parse_timestamp(payload).ok_or_else(|| JsonRowError::InvalidTimestamp {
            column: column.to_string(),
            value: payload.to_string(),
        }),
        _ => Err(unsupported()),
    }
}

/// Convert one JSON value to a column value.
pub fn json_to_column_value(
    column: &str,
    value: &serde_json::Value,
) -> Result<ColumnValue, JsonRowError> {
    match value {
        serde_json::Value::Null => Ok(ColumnValue::Null),
        serde_json::Value::Bool(b) => Ok(ColumnValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(ColumnValue::BigInt(i))
            } else if let Some(u) = n.as_u64() {
                Ok(ColumnValue::Decimal(Decimal::from(u)))
            } else if let Some(f) = n.as_f64() {
                Ok(ColumnValue::Double(f))
            } else {
                Err(JsonRowError::UnsupportedValue {
                    column: column.to_string(),
                    kind: "number",
                })
            }
        }
        serde_json::Value::String(s) => Ok(ColumnValue::Text(s.clone())),
        serde_json::Value::Object(map) if map.len() == 1 => {
            let (tag, payload) = map.iter().next().ok_or_else(|| JsonRowError::UnsupportedValue {
                column: column.to_string(),
                kind: "object",
            })?;
            tagged_to_column_value(column, tag, payload)
        }
        other => Err(JsonRowError::UnsupportedValue {
            column: column.to_string(),
            kind: json_kind(other),
        }),
    }
}

/// Convert a JSON object to a row, one column per key.
pub fn json_to_row(value: &serde_json::Value) -> Result<InternalRow, JsonRowError> {
    let serde_json::Value::Object(map) = value else {
        return Err(JsonRowError::NotAnObject(json_kind(value)));
    };

    map.iter()
        .map(|(column, v)| Ok((column.clone(), json_to_column_value(column, v)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use column_core::Row;
    use serde_json::json;

    #[test]
    fn test_scalar_values() {
        assert_eq!(json_to_column_value("c", &json!(null)).unwrap(), ColumnValue::Null);
        assert_eq!(json_to_column_value("c", &json!(true)).unwrap(), ColumnValue::Bool(true));
        assert_eq!(json_to_column_value("c", &json!(-12)).unwrap(), ColumnValue::BigInt(-12));
        assert_eq!(json_to_column_value("c", &json!(2.5)).unwrap(), ColumnValue::Double(2.5));
        assert_eq!(
            json_to_column_value("c", &json!("Soup")).unwrap(),
            ColumnValue::Text("Soup".into())
        );
    }

    #[test]
    fn test_u64_beyond_i64_becomes_decimal() {
        assert_eq!(
            json_to_column_value("c", &json!(u64::MAX)).unwrap(),
            ColumnValue::Decimal(Decimal::from(u64::MAX))
        );
    }

    #[test]
    fn test_binary_tag() {
        let value = json_to_column_value("p_image", &json!({"$binary": "3q2+7w=="})).unwrap();
        assert_eq!(value, ColumnValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));

        let err = json_to_column_value("p_image", &json!({"$binary": "not base64!"})).unwrap_err();
        assert!(matches!(err, JsonRowError::InvalidBase64 { .. }));
    }

    #[test]
    fn test_decimal_tag() {
        let value = json_to_column_value("p_price", &json!({"$decimal": "12.50"})).unwrap();
        assert_eq!(value, ColumnValue::Decimal(Decimal::new(1250, 2)));

        let err = json_to_column_value("p_price", &json!({"$decimal": "twelve"})).unwrap_err();
        assert!(matches!(err, JsonRowError::InvalidDecimal { .. }));
    }

    #[test]
    fn test_timestamp_tag() {
        let value =
            json_to_column_value("c", &json!({"$timestamp": "2024-01-01T12:00:00Z"})).unwrap();
        assert_eq!(
            value,
            ColumnValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())
        );

        let value =
            json_to_column_value("c", &json!({"$timestamp": "2024-01-01 12:00:00.5"})).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_milli_opt(12, 0, 0, 500)
            .unwrap();
        assert_eq!(value, ColumnValue::LocalTimestamp(expected));

        let err = json_to_column_value("c", &json!({"$timestamp": "yesterday"})).unwrap_err();
        assert!(matches!(err, JsonRowError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_unsupported_values() {
        for value in [json!([1, 2]), json!({"a": 1, "b": 2}), json!({"$oid": "x"})] {
            let err = json_to_column_value("c", &value).unwrap_err();
            assert!(matches!(err, JsonRowError::UnsupportedValue { .. }), "{value}");
        }
    }

    #[test]
    fn test_json_object_to_row() {
        let row = json_to_row(&json!({
            "c_id": 7,
            "c_customer_id": "cust-1",
            "c_checked_out": 0,
            "c_price": {"$decimal": "4.20"}
        }))
        .unwrap();

        assert_eq!(row.len(), 4);
        assert_eq!(row.get("c_id"), Some(&ColumnValue::BigInt(7)));
        assert_eq!(row.get("c_checked_out"), Some(&ColumnValue::BigInt(0)));
    }

    #[test]
    fn test_row_must_be_object() {
        assert!(matches!(
            json_to_row(&json!([1])),
            Err(JsonRowError::NotAnObject("array"))
        ));
    }
}
