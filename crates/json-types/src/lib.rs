//! JSON row conversions for column-core types.
//!
//! This crate provides conversions between JSON documents and the column
//! layer:
//!
//! # Modules
//!
//! - [`forward`] - TypedValue → JSON value conversion
//! - [`reverse`] - JSON value → ColumnValue conversion, JSON object → row
//!
//! # Example
//!
//! ```rust
//! use column_core::{Row, ColumnValue};
//! use json_types::json_to_row;
//!
//! let row = json_to_row(&serde_json::json!({"p_id": 1, "p_price": {"$decimal": "9.90"}})).unwrap();
//! assert_eq!(row.get("p_id"), Some(&ColumnValue::BigInt(1)));
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{decoded_row_to_json, JsonValue};
pub use reverse::{json_to_column_value, json_to_row, JsonRowError};
