use anyhow::Context;
use column_core::{EntitySchema, Row, SchemaFile};
use json_types::decoded_row_to_json;
use ordering_entities::EntityKind;
use serde_json::Value;
use std::path::Path;

/// How a row becomes output JSON.
#[derive(Debug, Clone)]
pub enum RowDecoder {
    /// A built-in entity: the row is mapped through `FromRow` and printed
    /// as its DTO
    Entity(EntityKind),
    /// An entity loaded from a YAML schema: the row is decoded field by
    /// field
    Schema(EntitySchema),
}

impl RowDecoder {
    /// Look `entity` up in `schema` if given, otherwise in the catalogue.
    pub fn resolve(entity: &str, schema: Option<&Path>) -> anyhow::Result<Self> {
        match schema {
            Some(path) => {
                let file = SchemaFile::from_file(path)
                    .with_context(|| format!("Failed to load entity schema from {path:?}"))?;
                Ok(Self::Schema(file.get_entity(entity)?.clone()))
            }
            None => Ok(Self::Entity(EntityKind::from_name(entity)?)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Entity(kind) => kind.descriptor().name,
            Self::Schema(schema) => &schema.name,
        }
    }

    /// Decode one row under `prefix`.
    pub fn decode<R: Row + ?Sized>(&self, row: &R, prefix: &str) -> anyhow::Result<Value> {
        match self {
            Self::Entity(kind) => Ok(kind.row_to_dto_json(row, prefix)?),
            Self::Schema(schema) => Ok(decoded_row_to_json(&schema.decode(row, prefix)?)),
        }
    }
}
