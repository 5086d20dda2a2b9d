//! Rows, prefixed column lookup and typed field extraction.
//!
//! A row mapper never touches driver types directly: it asks a
//! [`RowReader`] for a field, the reader builds the `{prefix}_{field}`
//! column name, looks the value up in the [`Row`] and runs it through
//! [`convert`].

use crate::convert::{convert, ConversionError};
use crate::schema::EntityDescriptor;
use crate::types::TargetType;
use crate::values::{ColumnValue, TypedValue};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// A retrieved record exposing column values by name.
pub trait Row {
    /// Value of the named column, or `None` if the row has no such column.
    fn get(&self, column: &str) -> Option<&ColumnValue>;

    /// Names of all columns in the row.
    fn column_names(&self) -> Vec<&str>;
}

/// Column name for `field` under `prefix`.
///
/// An empty prefix reads the bare field name.
pub fn column_name(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}_{field}")
    }
}

/// Look up `prefix_field` in `row` and convert it to `target`.
pub fn read_column<R: Row + ?Sized>(
    row: &R,
    prefix: &str,
    field: &str,
    target: TargetType,
) -> Result<Option<TypedValue>, ConversionError> {
    let column = column_name(prefix, field);
    let value = row
        .get(&column)
        .ok_or_else(|| ConversionError::MissingColumn {
            column: column.clone(),
        })?;
    convert(&column, value, target)
}

/// Owned, map-backed row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternalRow {
    columns: HashMap<String, ColumnValue>,
}

impl InternalRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a row column by column.
    pub fn builder() -> InternalRowBuilder {
        InternalRowBuilder::default()
    }

    /// Set a column, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Row for InternalRow {
    fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.columns.get(column)
    }

    fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, ColumnValue)> for InternalRow {
    fn from_iter<I: IntoIterator<Item = (String, ColumnValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// Builder for [`InternalRow`].
#[derive(Debug, Default)]
pub struct InternalRowBuilder {
    row: InternalRow,
}

impl InternalRowBuilder {
    /// Add a column.
    pub fn column(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.row.insert(column, value);
        self
    }

    /// Finish building.
    pub fn build(self) -> InternalRow {
        self.row
    }
}

/// Rust field types a row mapper can read.
pub trait ColumnType: Sized {
    /// Target type the column is converted to before extraction.
    const TARGET: TargetType;

    /// Extract the field value from a converted column.
    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError>;
}

fn unexpected(column: &str, value: &TypedValue, target: TargetType) -> ConversionError {
    ConversionError::TypeMismatch {
        column: column.to_string(),
        source_kind: value.target_type().as_str(),
        target,
    }
}

impl ColumnType for String {
    const TARGET: TargetType = TargetType::Text;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Text(s) => Ok(s),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for bool {
    const TARGET: TargetType = TargetType::Boolean;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Boolean(b) => Ok(b),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for i64 {
    const TARGET: TargetType = TargetType::Integer;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Integer(i) => Ok(i),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for i32 {
    const TARGET: TargetType = TargetType::Integer;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        let i = i64::from_typed(column, value)?;
        i32::try_from(i).map_err(|_| ConversionError::OutOfRange {
            column: column.to_string(),
            value: i,
            rust_type: "i32",
        })
    }
}

impl ColumnType for f64 {
    const TARGET: TargetType = TargetType::Float;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Float(f) => Ok(f),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for Vec<u8> {
    const TARGET: TargetType = TargetType::Bytes;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Bytes(b) => Ok(b),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for DateTime<Utc> {
    const TARGET: TargetType = TargetType::Instant;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Instant(dt) => Ok(dt),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

impl ColumnType for Decimal {
    const TARGET: TargetType = TargetType::Decimal;

    fn from_typed(column: &str, value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Decimal(d) => Ok(d),
            other => Err(unexpected(column, &other, Self::TARGET)),
        }
    }
}

/// Reads the fields of one entity out of a row under a fixed prefix.
pub struct RowReader<'a, R: Row + ?Sized> {
    row: &'a R,
    prefix: &'a str,
}

impl<'a, R: Row + ?Sized> RowReader<'a, R> {
    pub fn new(row: &'a R, prefix: &'a str) -> Self {
        Self { row, prefix }
    }

    /// Read `field` as `T`. A null column yields `Ok(None)`.
    pub fn get<T: ColumnType>(&self, field: &str) -> Result<Option<T>, ConversionError> {
        match read_column(self.row, self.prefix, field, T::TARGET)? {
            Some(value) => T::from_typed(&column_name(self.prefix, field), value).map(Some),
            None => Ok(None),
        }
    }
}

/// Entities that can be assembled from a row.
///
/// Implementations read every field listed in [`FromRow::DESCRIPTOR`]; the
/// first failing column fails the whole row.
pub trait FromRow: Sized {
    /// Declarative field list of the entity.
    const DESCRIPTOR: EntityDescriptor;

    /// Build the entity from the columns named `{prefix}_{field}`.
    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError>;
}

/// Fields of one row decoded without a Rust entity type, in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    pub entity: String,
    pub fields: Vec<(String, Option<TypedValue>)>,
}

impl DecodedRow {
    /// Decode `fields` (name, target) out of `row` under `prefix`.
    pub fn decode<'f, R, I>(
        entity: &str,
        fields: I,
        row: &R,
        prefix: &str,
    ) -> Result<Self, ConversionError>
    where
        R: Row + ?Sized,
        I: IntoIterator<Item = (&'f str, TargetType)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, target)| {
                read_column(row, prefix, name, target).map(|value| (name.to_string(), value))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            entity: entity.to_string(),
            fields,
        })
    }

    /// Value of a decoded field; `None` if the field is unknown.
    pub fn get(&self, field: &str) -> Option<&Option<TypedValue>> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}
