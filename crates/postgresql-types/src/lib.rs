//! PostgreSQL row conversions for column-core types.
//!
//! This crate turns rows returned by `tokio-postgres` into column-core
//! [`InternalRow`](column_core::InternalRow)s so the ordering row mappers
//! can read them like any other row.
//!
//! # Modules
//!
//! - [`reverse`] - PostgreSQL value → ColumnValue conversion
//!
//! # Example
//!
//! ```ignore
//! use postgresql_types::pg_row_to_internal;
//! use ordering_entities::Products;
//! use column_core::FromRow;
//!
//! for row in client.query("SELECT id AS p_id, name AS p_name, ... FROM products", &[]).await? {
//!     let product = Products::from_row(&pg_row_to_internal(&row)?, "p")?;
//! }
//! ```

pub mod reverse;

pub use reverse::{
    is_supported_type, pg_row_to_internal, read_raw, PostgreSQLRawValue, PostgreSQLRowError,
    PostgreSQLValueWithSchema,
};
