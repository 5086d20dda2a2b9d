//! Target types for column conversion.
//!
//! `TargetType` is the fixed set of semantic kinds the ordering domain needs
//! from a column, independent of what the database driver hands back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type a domain field requires.
///
/// # YAML Format
///
/// Target types are written in snake_case:
/// ```yaml
/// type: text
/// type: instant
/// type: decimal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// UTF-8 text
    Text,

    /// Boolean flag
    Boolean,

    /// 64-bit signed integer
    Integer,

    /// 64-bit IEEE 754 floating point
    Float,

    /// Binary data, materialized in memory
    Bytes,

    /// Point in time, UTC
    Instant,

    /// Exact decimal
    Decimal,
}

impl TargetType {
    /// All target types, in declaration order.
    pub const ALL: [TargetType; 7] = [
        TargetType::Text,
        TargetType::Boolean,
        TargetType::Integer,
        TargetType::Float,
        TargetType::Bytes,
        TargetType::Instant,
        TargetType::Decimal,
    ];

    /// The snake_case name used in schema files and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Text => "text",
            TargetType::Boolean => "boolean",
            TargetType::Integer => "integer",
            TargetType::Float => "float",
            TargetType::Bytes => "bytes",
            TargetType::Instant => "instant",
            TargetType::Decimal => "decimal",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
