//! Column value → typed value conversion.
//!
//! [`convert`] is the single routine every row mapper goes through. It is a
//! pure function of `(value, target)`: a null value is always absence, a
//! value already of the target's runtime type is returned unchanged, and
//! any other pair either follows one of the coercion rules below or fails
//! with [`ConversionError::TypeMismatch`].
//!
//! | target    | accepted sources |
//! |-----------|------------------|
//! | `text`    | text, char |
//! | `boolean` | bool, bit, integer 0/1, text in [`BOOLEAN_TEXT`] |
//! | `integer` | integers; float/double/decimal truncated toward zero |
//! | `float`   | bigint within ±2^53, smaller integers, float, double, decimal |
//! | `bytes`   | bytes, blob (read eagerly) |
//! | `instant` | timestamp, local timestamp (as UTC), date (midnight UTC), RFC 3339 text |
//! | `decimal` | integers, float, double, decimal, numeric text |

use crate::types::TargetType;
use crate::values::{ColumnValue, TypedValue};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Largest integer magnitude an f64 represents exactly.
const F64_EXACT_INT: u64 = 1 << 53;

/// Canonical text spellings of booleans, compared case-insensitively after
/// trimming.
pub const BOOLEAN_TEXT: &[(&str, bool)] = &[
    ("true", true),
    ("1", true),
    ("false", false),
    ("0", false),
];

/// Errors that can occur while reading a column into a typed value.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The value is present but has no defined coercion to the target
    #[error("column '{column}': cannot convert {source_kind} value to {target}")]
    TypeMismatch {
        column: String,
        source_kind: &'static str,
        target: TargetType,
    },

    /// The row has no column with this name
    #[error("column '{column}' is not present in the row")]
    MissingColumn { column: String },

    /// The converted value does not fit the field's Rust type
    #[error("column '{column}': value {value} out of range for {rust_type}")]
    OutOfRange {
        column: String,
        value: i64,
        rust_type: &'static str,
    },

    /// Reading a binary large object failed
    #[error("column '{column}': failed to read binary data: {source}")]
    BlobRead {
        column: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConversionError {
    /// Name of the column the error refers to.
    pub fn column(&self) -> &str {
        match self {
            Self::TypeMismatch { column, .. }
            | Self::MissingColumn { column }
            | Self::OutOfRange { column, .. }
            | Self::BlobRead { column, .. } => column,
        }
    }
}

/// Convert a raw column value to `target`.
///
/// Returns `Ok(None)` for null, `Ok(Some(_))` for a converted value. The
/// `column` name is only used for error context.
pub fn convert(
    column: &str,
    value: &ColumnValue,
    target: TargetType,
) -> Result<Option<TypedValue>, ConversionError> {
    if value.is_null() {
        return Ok(None);
    }

    let converted = match target {
        TargetType::Text => to_text(value).map(TypedValue::Text),
        TargetType::Boolean => to_boolean(value).map(TypedValue::Boolean),
        TargetType::Integer => to_integer(value).map(TypedValue::Integer),
        TargetType::Float => to_float(value).map(TypedValue::Float),
        TargetType::Decimal => to_decimal(value).map(TypedValue::Decimal),
        TargetType::Instant => to_instant(value).map(TypedValue::Instant),
        TargetType::Bytes => match to_bytes(value) {
            Some(Ok(bytes)) => Some(TypedValue::Bytes(bytes)),
            Some(Err(source)) => {
                return Err(ConversionError::BlobRead {
                    column: column.to_string(),
                    source,
                })
            }
            None => None,
        },
    };

    match converted {
        Some(typed) => Ok(Some(typed)),
        None => {
            debug!(
                column,
                source_kind = value.kind(),
                %target,
                "column value rejected"
            );
            Err(ConversionError::TypeMismatch {
                column: column.to_string(),
                source_kind: value.kind(),
                target,
            })
        }
    }
}

fn to_text(value: &ColumnValue) -> Option<String> {
    match value {
        ColumnValue::Text(s) => Some(s.clone()),
        ColumnValue::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

fn to_boolean(value: &ColumnValue) -> Option<bool> {
    match value {
        ColumnValue::Bool(b) | ColumnValue::Bit(b) => Some(*b),
        ColumnValue::Text(s) => {
            let s = s.trim();
            BOOLEAN_TEXT
                .iter()
                .find(|(spelling, _)| spelling.eq_ignore_ascii_case(s))
                .map(|(_, b)| *b)
        }
        other => match other.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
    }
}

/// Truncate toward zero, rejecting NaN, infinities and values outside i64.
fn truncate_f64(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

fn to_integer(value: &ColumnValue) -> Option<i64> {
    match value {
        ColumnValue::Float(f) => truncate_f64(f64::from(*f)),
        ColumnValue::Double(f) => truncate_f64(*f),
        ColumnValue::Decimal(d) => d.trunc().to_i64(),
        other => other.as_i64(),
    }
}

fn to_float(value: &ColumnValue) -> Option<f64> {
    match value {
        ColumnValue::Double(f) => Some(*f),
        ColumnValue::Float(f) => Some(f64::from(*f)),
        ColumnValue::Decimal(d) => d.to_f64(),
        ColumnValue::BigInt(i) if i.unsigned_abs() > F64_EXACT_INT => None,
        other => other.as_i64().map(|i| i as f64),
    }
}

fn to_decimal(value: &ColumnValue) -> Option<Decimal> {
    match value {
        ColumnValue::Decimal(d) => Some(*d),
        // Display gives the shortest text that parses back to the same float
        ColumnValue::Float(f) => {
            Decimal::from_str(&f.to_string()).ok().or_else(|| Decimal::from_f32(*f))
        }
        ColumnValue::Double(f) => {
            Decimal::from_str(&f.to_string()).ok().or_else(|| Decimal::from_f64(*f))
        }
        ColumnValue::Text(s) => Decimal::from_str(s.trim()).ok(),
        other => other.as_i64().map(Decimal::from),
    }
}

fn to_instant(value: &ColumnValue) -> Option<DateTime<Utc>> {
    match value {
        ColumnValue::Timestamp(dt) => Some(*dt),
        ColumnValue::LocalTimestamp(naive) => Some(naive.and_utc()),
        ColumnValue::Date(date) => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        ColumnValue::Text(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

fn to_bytes(value: &ColumnValue) -> Option<std::io::Result<Vec<u8>>> {
    match value {
        ColumnValue::Bytes(bytes) => Some(Ok(bytes.clone())),
        ColumnValue::Blob(blob) => Some(blob.read_all()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{Blob, BlobSource};
    use chrono::{NaiveDate, TimeZone};
    use std::io::{self, Read};

    fn sample_values() -> Vec<ColumnValue> {
        vec![
            ColumnValue::Bool(true),
            ColumnValue::Bit(false),
            ColumnValue::TinyInt(1),
            ColumnValue::SmallInt(0),
            ColumnValue::Int(42),
            ColumnValue::BigInt(-7),
            ColumnValue::Float(2.5),
            ColumnValue::Double(3.7),
            ColumnValue::Decimal(Decimal::new(1999, 2)),
            ColumnValue::Text("true".into()),
            ColumnValue::Char('x'),
            ColumnValue::Bytes(vec![0xde, 0xad]),
            ColumnValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ColumnValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        ]
    }

    fn ok(value: ColumnValue, target: TargetType) -> TypedValue {
        convert("c", &value, target).unwrap().unwrap()
    }

    fn mismatch(value: ColumnValue, target: TargetType) -> bool {
        matches!(
            convert("c", &value, target),
            Err(ConversionError::TypeMismatch { .. })
        )
    }

    #[test]
    fn test_null_is_absence_for_every_target() {
        for target in TargetType::ALL {
            assert!(convert("c", &ColumnValue::Null, target).unwrap().is_none());
        }
    }

    #[test]
    fn test_conversion_is_deterministic() {
        for value in sample_values() {
            for target in TargetType::ALL {
                let first = convert("c", &value, target).ok();
                let second = convert("c", &value, target).ok();
                assert_eq!(first, second, "{value:?} -> {target}");
            }
        }
    }

    #[test]
    fn test_identity_fast_path() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let price = Decimal::new(1234, 2);
        assert_eq!(
            ok(ColumnValue::Text("hello".into()), TargetType::Text),
            TypedValue::Text("hello".into())
        );
        assert_eq!(ok(ColumnValue::Bool(false), TargetType::Boolean), TypedValue::Boolean(false));
        assert_eq!(ok(ColumnValue::BigInt(i64::MIN), TargetType::Integer), TypedValue::Integer(i64::MIN));
        assert_eq!(ok(ColumnValue::Double(0.1), TargetType::Float), TypedValue::Float(0.1));
        assert_eq!(ok(ColumnValue::Bytes(vec![1, 2]), TargetType::Bytes), TypedValue::Bytes(vec![1, 2]));
        assert_eq!(ok(ColumnValue::Timestamp(ts), TargetType::Instant), TypedValue::Instant(ts));
        assert_eq!(ok(ColumnValue::Decimal(price), TargetType::Decimal), TypedValue::Decimal(price));
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!(ok(ColumnValue::TinyInt(-5), TargetType::Integer), TypedValue::Integer(-5));
        assert_eq!(ok(ColumnValue::Int(12), TargetType::Float), TypedValue::Float(12.0));
        assert_eq!(
            ok(ColumnValue::SmallInt(99), TargetType::Decimal),
            TypedValue::Decimal(Decimal::from(99))
        );
        assert_eq!(
            ok(ColumnValue::BigInt(i64::MAX), TargetType::Decimal),
            TypedValue::Decimal(Decimal::from(i64::MAX))
        );
    }

    #[test]
    fn test_bigint_beyond_f64_precision_rejected() {
        assert_eq!(
            ok(ColumnValue::BigInt(1 << 53), TargetType::Float),
            TypedValue::Float(9_007_199_254_740_992.0)
        );
        assert!(mismatch(ColumnValue::BigInt((1 << 53) + 1), TargetType::Float));
    }

    #[test]
    fn test_float_to_integer_truncates_toward_zero() {
        assert_eq!(ok(ColumnValue::Double(3.7), TargetType::Integer), TypedValue::Integer(3));
        assert_eq!(ok(ColumnValue::Double(-3.7), TargetType::Integer), TypedValue::Integer(-3));
        assert_eq!(ok(ColumnValue::Float(0.99), TargetType::Integer), TypedValue::Integer(0));
        assert_eq!(
            ok(ColumnValue::Decimal(Decimal::new(-1299, 2)), TargetType::Integer),
            TypedValue::Integer(-12)
        );
    }

    #[test]
    fn test_integral_float_round_trips_through_integer() {
        for f in [0.0, 1.0, -42.0, 1_000_000.0] {
            let TypedValue::Integer(i) = ok(ColumnValue::Double(f), TargetType::Integer) else {
                panic!("expected integer");
            };
            assert_eq!(ok(ColumnValue::BigInt(i), TargetType::Float), TypedValue::Float(f));
        }
    }

    #[test]
    fn test_non_finite_and_oversized_floats_rejected() {
        assert!(mismatch(ColumnValue::Double(f64::NAN), TargetType::Integer));
        assert!(mismatch(ColumnValue::Double(f64::INFINITY), TargetType::Integer));
        assert!(mismatch(ColumnValue::Double(1e19), TargetType::Integer));
        assert!(mismatch(ColumnValue::Double(f64::NAN), TargetType::Decimal));
    }

    #[test]
    fn test_float_to_decimal_keeps_every_digit() {
        for f in [0.1 + 0.2, 123_456_789.123_456_79, 12_345_678.901_234_567, 11.9, -3.7] {
            let TypedValue::Decimal(d) = ok(ColumnValue::Double(f), TargetType::Decimal) else {
                panic!("expected a decimal for {f}");
            };
            assert_eq!(d.to_string().parse::<f64>().unwrap(), f, "{d}");
        }
        assert_eq!(
            ok(ColumnValue::Double(0.1 + 0.2), TargetType::Decimal),
            TypedValue::Decimal(Decimal::from_str("0.30000000000000004").unwrap())
        );

        let TypedValue::Decimal(d) = ok(ColumnValue::Float(16_777.217), TargetType::Decimal) else {
            panic!("expected a decimal");
        };
        assert_eq!(d.to_string().parse::<f32>().unwrap(), 16_777.217f32);
        assert_eq!(
            ok(ColumnValue::Float(0.1), TargetType::Decimal),
            TypedValue::Decimal(Decimal::new(1, 1))
        );
    }

    #[test]
    fn test_float_beyond_decimal_range_rejected() {
        assert!(mismatch(ColumnValue::Double(1e30), TargetType::Decimal));
        assert!(mismatch(ColumnValue::Float(f32::INFINITY), TargetType::Decimal));
    }

    #[test]
    fn test_decimal_to_float() {
        assert_eq!(
            ok(ColumnValue::Decimal(Decimal::new(125, 1)), TargetType::Float),
            TypedValue::Float(12.5)
        );
    }

    #[test]
    fn test_boolean_canonical_table() {
        assert_eq!(ok(ColumnValue::Int(1), TargetType::Boolean), TypedValue::Boolean(true));
        assert_eq!(ok(ColumnValue::Int(0), TargetType::Boolean), TypedValue::Boolean(false));
        assert_eq!(ok(ColumnValue::TinyInt(1), TargetType::Boolean), TypedValue::Boolean(true));
        assert_eq!(ok(ColumnValue::Bit(true), TargetType::Boolean), TypedValue::Boolean(true));
        assert_eq!(
            ok(ColumnValue::Text("true".into()), TargetType::Boolean),
            TypedValue::Boolean(true)
        );
        assert_eq!(
            ok(ColumnValue::Text(" FALSE ".into()), TargetType::Boolean),
            TypedValue::Boolean(false)
        );
        assert!(mismatch(ColumnValue::Int(2), TargetType::Boolean));
        assert!(mismatch(ColumnValue::Text("yes".into()), TargetType::Boolean));
        assert!(mismatch(ColumnValue::Double(1.0), TargetType::Boolean));
    }

    #[test]
    fn test_text_sources_only() {
        assert_eq!(ok(ColumnValue::Char('A'), TargetType::Text), TypedValue::Text("A".into()));
        assert!(mismatch(ColumnValue::Int(5), TargetType::Text));
        assert!(mismatch(ColumnValue::Double(1.5), TargetType::Text));
        assert!(mismatch(ColumnValue::Decimal(Decimal::ONE), TargetType::Text));
        assert!(mismatch(ColumnValue::Bool(true), TargetType::Text));
    }

    #[test]
    fn test_text_to_bytes_is_a_mismatch() {
        match convert("p_image", &ColumnValue::Text("abc".into()), TargetType::Bytes) {
            Err(ConversionError::TypeMismatch {
                column,
                source_kind,
                target,
            }) => {
                assert_eq!(column, "p_image");
                assert_eq!(source_kind, "text");
                assert_eq!(target, TargetType::Bytes);
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_text_numeric_and_time_parsing() {
        assert_eq!(
            ok(ColumnValue::Text(" 10.50 ".into()), TargetType::Decimal),
            TypedValue::Decimal(Decimal::new(1050, 2))
        );
        assert!(mismatch(ColumnValue::Text("ten".into()), TargetType::Decimal));
        assert!(mismatch(ColumnValue::Text("10".into()), TargetType::Integer));
        assert!(mismatch(ColumnValue::Text("10".into()), TargetType::Float));
        assert_eq!(
            ok(ColumnValue::Text("2024-03-01T10:00:00+02:00".into()), TargetType::Instant),
            TypedValue::Instant(Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_local_timestamp_and_date_read_as_utc() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        assert_eq!(
            ok(ColumnValue::LocalTimestamp(naive), TargetType::Instant),
            TypedValue::Instant(Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap())
        );
        assert_eq!(
            ok(
                ColumnValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()),
                TargetType::Instant
            ),
            TypedValue::Instant(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_blob_materialized_into_independent_buffers() {
        let value = ColumnValue::Blob(Blob::from_bytes(vec![9u8, 8, 7]));
        let TypedValue::Bytes(mut first) = ok(value.clone(), TargetType::Bytes) else {
            panic!("expected bytes");
        };
        let TypedValue::Bytes(second) = ok(value, TargetType::Bytes) else {
            panic!("expected bytes");
        };
        assert_eq!(first, second);
        first[0] = 0;
        assert_eq!(second, vec![9, 8, 7]);
    }

    #[derive(Debug)]
    struct BrokenBlob;

    impl BlobSource for BrokenBlob {
        fn open(&self) -> io::Result<Box<dyn Read + '_>> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "handle closed"))
        }
    }

    #[test]
    fn test_blob_read_failure() {
        let err = convert("p_image", &ColumnValue::Blob(Blob::new(BrokenBlob)), TargetType::Bytes)
            .unwrap_err();
        assert!(matches!(err, ConversionError::BlobRead { .. }));
        assert_eq!(err.column(), "p_image");
        assert!(err.to_string().contains("handle closed"));
    }

    #[test]
    fn test_unsupported_pairs() {
        assert!(mismatch(ColumnValue::Bytes(vec![1]), TargetType::Integer));
        assert!(mismatch(ColumnValue::Bool(true), TargetType::Integer));
        assert!(mismatch(ColumnValue::Int(1), TargetType::Instant));
        assert!(mismatch(ColumnValue::Timestamp(Utc::now()), TargetType::Text));
    }
}
