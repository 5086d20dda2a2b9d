//! Reverse conversion: PostgreSQL value → ColumnValue
//!
//! Reading happens in two steps. [`read_raw`] pulls a column out of a
//! `tokio_postgres::Row` as the Rust type its PostgreSQL type decodes to,
//! then [`PostgreSQLValueWithSchema::to_column_value`] maps that raw value
//! onto the driver-neutral [`ColumnValue`] the row mappers consume.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use column_core::{ColumnValue, InternalRow};
use rust_decimal::Decimal;
use thiserror::Error;
use tokio_postgres::types::Type;
use tokio_postgres::Row;
use tracing::{debug, warn};
use uuid::Uuid;

/// Errors that can occur during PostgreSQL to ColumnValue conversion.
#[derive(Debug, Error)]
pub enum PostgreSQLRowError {
    /// The column type is not supported
    #[error("Unsupported PostgreSQL type for column '{column}': {pg_type}")]
    UnsupportedType { column: String, pg_type: String },

    /// A type mismatch occurred
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The row has no column at this index
    #[error("Column index {index} out of range for row with {len} columns")]
    ColumnIndex { index: usize, len: usize },

    /// The driver failed to decode the column
    #[error("Failed to decode column '{column}': {source}")]
    Decode {
        column: String,
        #[source]
        source: tokio_postgres::Error,
    },
}

/// Raw value from PostgreSQL.
#[derive(Debug, Clone, PartialEq)]
pub enum PostgreSQLRawValue {
    /// Null value
    Null,
    /// Boolean
    Bool(bool),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// Decimal
    Decimal(Decimal),
    /// Text/string
    Text(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// UUID
    Uuid(Uuid),
    /// Date
    Date(NaiveDate),
    /// Timestamp (no timezone)
    Timestamp(NaiveDateTime),
    /// Timestamp with timezone
    TimestampTz(DateTime<Utc>),
}

/// PostgreSQL value with schema information for reverse conversion.
#[derive(Debug, Clone)]
pub struct PostgreSQLValueWithSchema {
    /// The PostgreSQL column type
    pub pg_type: Type,
    /// The raw value
    pub value: PostgreSQLRawValue,
}

impl PostgreSQLValueWithSchema {
    /// Create a new PostgreSQLValueWithSchema.
    pub fn new(pg_type: Type, value: PostgreSQLRawValue) -> Self {
        Self { pg_type, value }
    }

    /// Convert to ColumnValue.
    pub fn to_column_value(&self) -> Result<ColumnValue, PostgreSQLRowError> {
        use PostgreSQLRawValue as Raw;

        if matches!(self.value, Raw::Null) {
            return Ok(ColumnValue::Null);
        }

        let t = &self.pg_type;
        let value = match &self.value {
            Raw::Bool(b) if *t == Type::BOOL => ColumnValue::Bool(*b),
            Raw::Int16(i) if *t == Type::INT2 => ColumnValue::SmallInt(*i),
            Raw::Int32(i) if *t == Type::INT4 => ColumnValue::Int(*i),
            Raw::Int64(i) if *t == Type::INT8 => ColumnValue::BigInt(*i),
            Raw::Float32(f) if *t == Type::FLOAT4 => ColumnValue::Float(*f),
            Raw::Float64(f) if *t == Type::FLOAT8 => ColumnValue::Double(*f),
            Raw::Decimal(d) if *t == Type::NUMERIC => ColumnValue::Decimal(*d),
            Raw::Text(s) if is_text_type(t) => ColumnValue::Text(s.clone()),
            Raw::Bytes(b) if *t == Type::BYTEA => ColumnValue::Bytes(b.clone()),
            // UUIDs are identifiers in this domain; they are read as text
            Raw::Uuid(u) if *t == Type::UUID => ColumnValue::Text(u.to_string()),
            Raw::Date(d) if *t == Type::DATE => ColumnValue::Date(*d),
            Raw::Timestamp(ts) if *t == Type::TIMESTAMP => ColumnValue::LocalTimestamp(*ts),
            Raw::TimestampTz(dt) if *t == Type::TIMESTAMPTZ => ColumnValue::Timestamp(*dt),
            other => {
                return Err(PostgreSQLRowError::TypeMismatch {
                    expected: t.to_string(),
                    actual: format!("{other:?}"),
                })
            }
        };
        Ok(value)
    }
}

fn is_text_type(t: &Type) -> bool {
    *t == Type::TEXT || *t == Type::VARCHAR || *t == Type::BPCHAR || *t == Type::NAME
}

/// Check whether columns of this type can be read.
pub fn is_supported_type(t: &Type) -> bool {
    is_text_type(t)
        || [
            Type::BOOL,
            Type::INT2,
            Type::INT4,
            Type::INT8,
            Type::FLOAT4,
            Type::FLOAT8,
            Type::NUMERIC,
            Type::BYTEA,
            Type::UUID,
            Type::DATE,
            Type::TIMESTAMP,
            Type::TIMESTAMPTZ,
        ]
        .contains(t)
}

/// Read column `index` of `row` as the raw value its type decodes to.
pub fn read_raw(row: &Row, index: usize) -> Result<PostgreSQLRawValue, PostgreSQLRowError> {
    use PostgreSQLRawValue as Raw;

    let columns = row.columns();
    let column = columns.get(index).ok_or(PostgreSQLRowError::ColumnIndex {
        index,
        len: columns.len(),
    })?;
    let pg_type = column.type_();
    if !is_supported_type(pg_type) {
        warn!(
            "Unsupported PostgreSQL type {} for column '{}'",
            pg_type,
            column.name()
        );
        return Err(PostgreSQLRowError::UnsupportedType {
            column: column.name().to_string(),
            pg_type: pg_type.to_string(),
        });
    }
    let decode = |source: tokio_postgres::Error| PostgreSQLRowError::Decode {
        column: column.name().to_string(),
        source,
    };

    let raw = match *pg_type {
        Type::BOOL => row.try_get::<_, Option<bool>>(index).map_err(decode)?.map(Raw::Bool),
        Type::INT2 => row.try_get::<_, Option<i16>>(index).map_err(decode)?.map(Raw::Int16),
        Type::INT4 => row.try_get::<_, Option<i32>>(index).map_err(decode)?.map(Raw::Int32),
        Type::INT8 => row.try_get::<_, Option<i64>>(index).map_err(decode)?.map(Raw::Int64),
        Type::FLOAT4 => row.try_get::<_, Option<f32>>(index).map_err(decode)?.map(Raw::Float32),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(index).map_err(decode)?.map(Raw::Float64),
        Type::NUMERIC => row
            .try_get::<_, Option<Decimal>>(index)
            .map_err(decode)?
            .map(Raw::Decimal),
        Type::BYTEA => row
            .try_get::<_, Option<Vec<u8>>>(index)
            .map_err(decode)?
            .map(Raw::Bytes),
        Type::UUID => row.try_get::<_, Option<Uuid>>(index).map_err(decode)?.map(Raw::Uuid),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)
            .map_err(decode)?
            .map(Raw::Date),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(index)
            .map_err(decode)?
            .map(Raw::Timestamp),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(index)
            .map_err(decode)?
            .map(Raw::TimestampTz),
        // Only the text types are left once is_supported_type has passed
        _ => row
            .try_get::<_, Option<String>>(index)
            .map_err(decode)?
            .map(Raw::Text),
    };

    Ok(raw.unwrap_or(Raw::Null))
}

/// Convert every column of a PostgreSQL row into an [`InternalRow`].
pub fn pg_row_to_internal(row: &Row) -> Result<InternalRow, PostgreSQLRowError> {
    let mut internal = InternalRow::new();
    for (index, column) in row.columns().iter().enumerate() {
        let raw = read_raw(row, index)?;
        let value = PostgreSQLValueWithSchema::new(column.type_().clone(), raw).to_column_value()?;
        internal.insert(column.name(), value);
    }
    debug!("Read PostgreSQL row with {} columns", internal.len());
    Ok(internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn convert(pg_type: Type, value: PostgreSQLRawValue) -> ColumnValue {
        PostgreSQLValueWithSchema::new(pg_type, value)
            .to_column_value()
            .unwrap()
    }

    #[test]
    fn test_null_conversion() {
        assert_eq!(convert(Type::INT8, PostgreSQLRawValue::Null), ColumnValue::Null);
        assert_eq!(convert(Type::BYTEA, PostgreSQLRawValue::Null), ColumnValue::Null);
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(
            convert(Type::INT2, PostgreSQLRawValue::Int16(7)),
            ColumnValue::SmallInt(7)
        );
        assert_eq!(
            convert(Type::INT4, PostgreSQLRawValue::Int32(42)),
            ColumnValue::Int(42)
        );
        assert_eq!(
            convert(Type::INT8, PostgreSQLRawValue::Int64(9_223_372_036_854_775_807)),
            ColumnValue::BigInt(i64::MAX)
        );
    }

    #[test]
    fn test_numeric_conversion() {
        let d = Decimal::new(12345, 2);
        assert_eq!(
            convert(Type::NUMERIC, PostgreSQLRawValue::Decimal(d)),
            ColumnValue::Decimal(d)
        );
        assert_eq!(
            convert(Type::FLOAT4, PostgreSQLRawValue::Float32(1.5)),
            ColumnValue::Float(1.5)
        );
    }

    #[test]
    fn test_text_conversion() {
        for t in [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME] {
            assert_eq!(
                convert(t, PostgreSQLRawValue::Text("hello world".to_string())),
                ColumnValue::Text("hello world".to_string())
            );
        }
    }

    #[test]
    fn test_uuid_read_as_text() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            convert(Type::UUID, PostgreSQLRawValue::Uuid(uuid)),
            ColumnValue::Text("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
    }

    #[test]
    fn test_timestamp_conversion() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 14, 30, 0).unwrap();
        assert_eq!(
            convert(Type::TIMESTAMPTZ, PostgreSQLRawValue::TimestampTz(dt)),
            ColumnValue::Timestamp(dt)
        );
        assert_eq!(
            convert(Type::TIMESTAMP, PostgreSQLRawValue::Timestamp(dt.naive_utc())),
            ColumnValue::LocalTimestamp(dt.naive_utc())
        );
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            convert(Type::DATE, PostgreSQLRawValue::Date(date)),
            ColumnValue::Date(date)
        );
    }

    #[test]
    fn test_type_mismatch() {
        let result =
            PostgreSQLValueWithSchema::new(Type::INT4, PostgreSQLRawValue::Text("1".into()))
                .to_column_value();
        assert!(matches!(result, Err(PostgreSQLRowError::TypeMismatch { .. })));
    }

    #[test]
    fn test_supported_types() {
        assert!(is_supported_type(&Type::NUMERIC));
        assert!(is_supported_type(&Type::VARCHAR));
        assert!(!is_supported_type(&Type::JSONB));
        assert!(!is_supported_type(&Type::INT4_ARRAY));
    }

    #[test]
    fn test_bit_and_single_byte_char_unsupported() {
        assert!(!is_supported_type(&Type::BIT));
        assert!(!is_supported_type(&Type::VARBIT));
        assert!(!is_supported_type(&Type::CHAR));
        assert!(is_supported_type(&Type::BPCHAR));
    }

    #[test]
    fn test_every_supported_type_maps_to_a_column_value() {
        use PostgreSQLRawValue as Raw;

        let samples = [
            (Type::BOOL, Raw::Bool(true)),
            (Type::INT2, Raw::Int16(1)),
            (Type::INT4, Raw::Int32(1)),
            (Type::INT8, Raw::Int64(1)),
            (Type::FLOAT4, Raw::Float32(1.0)),
            (Type::FLOAT8, Raw::Float64(1.0)),
            (Type::NUMERIC, Raw::Decimal(Decimal::ONE)),
            (Type::TEXT, Raw::Text("a".into())),
            (Type::VARCHAR, Raw::Text("a".into())),
            (Type::BPCHAR, Raw::Text("a".into())),
            (Type::NAME, Raw::Text("a".into())),
            (Type::BYTEA, Raw::Bytes(vec![1])),
            (Type::UUID, Raw::Uuid(Uuid::nil())),
            (Type::DATE, Raw::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
            (Type::TIMESTAMP, Raw::Timestamp(NaiveDateTime::default())),
            (Type::TIMESTAMPTZ, Raw::TimestampTz(DateTime::<Utc>::default())),
        ];
        for (pg_type, raw) in samples {
            assert!(is_supported_type(&pg_type), "{pg_type}");
            assert!(
                PostgreSQLValueWithSchema::new(pg_type.clone(), raw).to_column_value().is_ok(),
                "{pg_type}"
            );
        }
    }

    #[test]
    fn test_column_index_error_message() {
        let err = PostgreSQLRowError::ColumnIndex { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Column index 4 out of range for row with 2 columns"
        );
    }
}
