//! Column conversion core for the restaurant-ordering row mappers.
//!
//! This crate provides the pieces every row mapper is built from:
//!
//! - [`ColumnValue`] - Raw column value with its driver-reported runtime type
//! - [`TargetType`] - Semantic type a domain field requires
//! - [`convert`] - The single column → typed value conversion routine
//! - [`Row`] / [`InternalRow`] - Rows exposing column values by name
//! - [`RowReader`] / [`FromRow`] - Typed, prefixed field extraction for entities
//! - [`EntityDescriptor`] / [`SchemaFile`] - Declarative entity field lists
//!
//! # Architecture
//!
//! ```text
//! column-core (this crate)
//!    │
//!    ├─── json-types          (JSON objects → InternalRow, TypedValue → JSON)
//!    ├─── postgresql-types    (tokio-postgres rows → InternalRow)
//!    └─── ordering-entities   (FromRow for every entity of the ordering domain)
//! ```
//!
//! # Example
//!
//! ```rust
//! use column_core::{convert, ColumnValue, TargetType, TypedValue};
//!
//! // A NUMERIC column handed back as a double, truncated toward zero
//! let typed = convert("o_quantity", &ColumnValue::Double(3.7), TargetType::Integer).unwrap();
//! assert_eq!(typed, Some(TypedValue::Integer(3)));
//!
//! // Absence is always representable
//! assert_eq!(convert("o_note", &ColumnValue::Null, TargetType::Text).unwrap(), None);
//! ```

pub mod convert;
pub mod row;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use convert::{convert, ConversionError, BOOLEAN_TEXT};
pub use row::{
    column_name, read_column, ColumnType, DecodedRow, FromRow, InternalRow, InternalRowBuilder,
    Row, RowReader,
};
pub use schema::{EntityDescriptor, EntitySchema, FieldDescriptor, FieldSchema, SchemaError, SchemaFile};
pub use types::TargetType;
pub use values::{Blob, BlobSource, ColumnValue, TypedValue};
