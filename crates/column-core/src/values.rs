//! Column values as read from a row, and the typed values they convert to.
//!
//! `ColumnValue` carries whatever runtime type the driver reported for a
//! column. `TypedValue` is the same value after conversion to a
//! [`TargetType`].

use crate::types::TargetType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::io::{self, Read};
use std::sync::Arc;

/// Readable source of binary column data.
///
/// Drivers that hand out large objects as handles implement this so the
/// converter can read the full content at conversion time. Each call to
/// `open` must start from the beginning of the data.
pub trait BlobSource: fmt::Debug + Send + Sync {
    /// Open a fresh reader over the whole object.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Binary data that is already in memory but still handed out as a handle.
#[derive(Debug)]
struct InMemoryBlob(Arc<[u8]>);

impl BlobSource for InMemoryBlob {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(&self.0[..]))
    }
}

/// Shared handle to a binary large object.
///
/// Cloning the handle does not copy the data. Equality is handle identity.
#[derive(Debug, Clone)]
pub struct Blob(Arc<dyn BlobSource>);

impl Blob {
    /// Wrap a custom blob source.
    pub fn new(source: impl BlobSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    /// Create a handle over bytes that are already in memory.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(InMemoryBlob(bytes.into()))
    }

    /// Read the entire object into a newly allocated buffer.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.0.open()?.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Raw column value with its driver-reported runtime type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// SQL NULL
    Null,

    /// Boolean
    Bool(bool),

    /// Single bit flag (e.g. `BIT(1)`)
    Bit(bool),

    /// 8-bit integer
    TinyInt(i8),

    /// 16-bit integer
    SmallInt(i16),

    /// 32-bit integer
    Int(i32),

    /// 64-bit integer
    BigInt(i64),

    /// 32-bit float
    Float(f32),

    /// 64-bit float
    Double(f64),

    /// Exact decimal
    Decimal(Decimal),

    /// Text
    Text(String),

    /// Single character
    Char(char),

    /// In-memory binary data
    Bytes(Vec<u8>),

    /// Handle to binary data that still has to be read
    Blob(Blob),

    /// Timestamp with time zone, normalized to UTC
    Timestamp(DateTime<Utc>),

    /// Timestamp without time zone
    LocalTimestamp(NaiveDateTime),

    /// Calendar date
    Date(NaiveDate),
}

impl ColumnValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the runtime type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Bit(_) => "bit",
            Self::TinyInt(_) => "tinyint",
            Self::SmallInt(_) => "smallint",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Char(_) => "char",
            Self::Bytes(_) => "bytes",
            Self::Blob(_) => "blob",
            Self::Timestamp(_) => "timestamp",
            Self::LocalTimestamp(_) => "local_timestamp",
            Self::Date(_) => "date",
        }
    }

    /// The integer carried by any integer-family variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::TinyInt(i) => Some(i64::from(*i)),
            Self::SmallInt(i) => Some(i64::from(*i)),
            Self::Int(i) => Some(i64::from(*i)),
            Self::BigInt(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<Decimal> for ColumnValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for ColumnValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Value after conversion to a [`TargetType`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Instant(DateTime<Utc>),
    Decimal(Decimal),
}

impl TypedValue {
    /// The target type this value belongs to.
    pub fn target_type(&self) -> TargetType {
        match self {
            Self::Text(_) => TargetType::Text,
            Self::Boolean(_) => TargetType::Boolean,
            Self::Integer(_) => TargetType::Integer,
            Self::Float(_) => TargetType::Float,
            Self::Bytes(_) => TargetType::Bytes,
            Self::Instant(_) => TargetType::Instant,
            Self::Decimal(_) => TargetType::Decimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_family_accessor() {
        assert_eq!(ColumnValue::TinyInt(-3).as_i64(), Some(-3));
        assert_eq!(ColumnValue::SmallInt(300).as_i64(), Some(300));
        assert_eq!(ColumnValue::Int(70_000).as_i64(), Some(70_000));
        assert_eq!(ColumnValue::BigInt(i64::MAX).as_i64(), Some(i64::MAX));
        assert_eq!(ColumnValue::Double(1.0).as_i64(), None);
        assert_eq!(ColumnValue::Bool(true).as_i64(), None);
    }

    #[test]
    fn test_option_into_column_value() {
        assert_eq!(ColumnValue::from(None::<i64>), ColumnValue::Null);
        assert_eq!(ColumnValue::from(Some("x")), ColumnValue::Text("x".into()));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_values_shareable_across_threads() {
        assert_send_sync::<ColumnValue>();
        assert_send_sync::<TypedValue>();
        assert_send_sync::<Blob>();
    }

    #[test]
    fn test_blob_reads_from_start_each_time() {
        let blob = Blob::from_bytes(vec![1u8, 2, 3]);
        assert_eq!(blob.read_all().unwrap(), vec![1, 2, 3]);
        assert_eq!(blob.read_all().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_blob_equality_is_handle_identity() {
        let a = Blob::from_bytes(vec![1u8]);
        let b = Blob::from_bytes(vec![1u8]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_typed_value_target_type() {
        assert_eq!(TypedValue::Text("a".into()).target_type(), TargetType::Text);
        assert_eq!(TypedValue::Integer(1).target_type(), TargetType::Integer);
        assert_eq!(
            TypedValue::Decimal(Decimal::new(125, 2)).target_type(),
            TargetType::Decimal
        );
    }
}
