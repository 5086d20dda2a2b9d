//! Declarative entity field lists.
//!
//! ## Type Hierarchy
//!
//! - `FieldDescriptor` / `EntityDescriptor` - static field lists compiled
//!   into the entity catalogue
//! - `FieldSchema` / `EntitySchema` - owned counterparts loaded from YAML,
//!   for entities outside the catalogue
//! - `SchemaFile` - a YAML document with one or more entity schemas

use crate::convert::ConversionError;
use crate::row::{column_name, DecodedRow, Row};
use crate::types::TargetType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Entity not found in schema
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// The same field is declared twice
    #[error("Field '{field}' declared more than once in entity '{entity}'")]
    DuplicateField { entity: String, field: String },
}

// ============================================================================
// Static descriptors
// ============================================================================

/// One field of an entity: its name and the type it is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub target: TargetType,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, target: TargetType) -> Self {
        Self { name, target }
    }
}

/// Field list of an entity in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Entity name, e.g. `NewOrder`
    pub name: &'static str,
    /// Backing table, e.g. `new_order`
    pub table: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EntityDescriptor {
    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Column names the entity reads under `prefix`.
    pub fn column_names(&self, prefix: &str) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| column_name(prefix, f.name))
            .collect()
    }

    /// Decode every field of the entity without building the Rust type.
    pub fn decode<R: Row + ?Sized>(
        &self,
        row: &R,
        prefix: &str,
    ) -> Result<DecodedRow, ConversionError> {
        DecodedRow::decode(
            self.name,
            self.fields.iter().map(|f| (f.name, f.target)),
            row,
            prefix,
        )
    }
}

// ============================================================================
// YAML schemas
// ============================================================================

/// Owned field definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub target: TargetType,
}

/// Owned entity definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntitySchema {
    pub name: String,

    /// Backing table; defaults to the entity name
    #[serde(default)]
    pub table: Option<String>,

    pub fields: Vec<FieldSchema>,
}

impl EntitySchema {
    /// Backing table name.
    pub fn table(&self) -> &str {
        self.table.as_deref().unwrap_or(&self.name)
    }

    /// Decode every field of the entity.
    pub fn decode<R: Row + ?Sized>(
        &self,
        row: &R,
        prefix: &str,
    ) -> Result<DecodedRow, ConversionError> {
        DecodedRow::decode(
            &self.name,
            self.fields.iter().map(|f| (f.name.as_str(), f.target)),
            row,
            prefix,
        )
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    entity: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<&EntityDescriptor> for EntitySchema {
    fn from(descriptor: &EntityDescriptor) -> Self {
        Self {
            name: descriptor.name.to_string(),
            table: Some(descriptor.table.to_string()),
            fields: descriptor
                .fields
                .iter()
                .map(|f| FieldSchema {
                    name: f.name.to_string(),
                    target: f.target,
                })
                .collect(),
        }
    }
}

/// A schema file: a list of entity definitions.
///
/// ```yaml
/// entities:
///   - name: Discount
///     table: discount
///     fields:
///       - name: id
///         type: integer
///       - name: percent
///         type: decimal
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SchemaFile {
    pub entities: Vec<EntitySchema>,
}

impl SchemaFile {
    /// Load a schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_yaml::from_str(yaml)?;
        for entity in &schema.entities {
            entity.validate()?;
        }
        Ok(schema)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Get an entity by name (case-insensitive) or table name.
    pub fn get_entity(&self, name: &str) -> Result<&EntitySchema, SchemaError> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name) || e.table() == name)
            .ok_or_else(|| SchemaError::EntityNotFound(name.to_string()))
    }

    /// Get all entity names.
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.iter().map(|e| e.name.as_str()).collect()
    }
}
