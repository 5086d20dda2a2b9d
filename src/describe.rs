//! Entity descriptions for the `describe` command.

use anyhow::{Context, Result};
use column_core::{column_name, EntitySchema, SchemaFile, TargetType};
use ordering_entities::catalogue_schema;
use serde::Serialize;
use std::path::Path;

/// One entity with the columns it reads under a prefix.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntityDescription {
    pub name: String,
    pub table: String,
    pub columns: Vec<ColumnDescription>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnDescription {
    pub column: String,
    pub field: String,
    #[serde(rename = "type")]
    pub target: TargetType,
}

impl EntityDescription {
    pub fn new(schema: &EntitySchema, prefix: &str) -> Self {
        Self {
            name: schema.name.clone(),
            table: schema.table().to_string(),
            columns: schema
                .fields
                .iter()
                .map(|f| ColumnDescription {
                    column: column_name(prefix, &f.name),
                    field: f.name.clone(),
                    target: f.target,
                })
                .collect(),
        }
    }
}

/// Describe one entity, or all of them, from `schema` or the catalogue.
pub fn describe(
    entity: Option<&str>,
    prefix: &str,
    schema: Option<&Path>,
) -> Result<Vec<EntityDescription>> {
    let file = match schema {
        Some(path) => SchemaFile::from_file(path)
            .with_context(|| format!("Failed to load entity schema from {path:?}"))?,
        None => catalogue_schema(),
    };

    let entities = match entity {
        Some(name) => vec![file.get_entity(name)?],
        None => file.entities.iter().collect(),
    };

    Ok(entities
        .into_iter()
        .map(|e| EntityDescription::new(e, prefix))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordering_entities::EntityKind;

    #[test]
    fn test_describe_one_entity() {
        let described = describe(Some("new_order"), "o", None).unwrap();
        assert_eq!(described.len(), 1);

        let order = &described[0];
        assert_eq!(order.name, "NewOrder");
        assert_eq!(order.table, "new_order");
        assert_eq!(order.columns[0].column, "o_id");

        let duration = order
            .columns
            .iter()
            .find(|c| c.field == "estimated_duration")
            .unwrap();
        assert_eq!(duration.column, "o_estimated_duration");
        assert_eq!(duration.target, TargetType::Float);
    }

    #[test]
    fn test_describe_all_as_yaml() {
        let described = describe(None, "", None).unwrap();
        assert_eq!(described.len(), EntityKind::ALL.len());

        let yaml = serde_yaml::to_string(&described).unwrap();
        assert!(yaml.contains("table: customer_profile"));
        assert!(yaml.contains("type: bytes"));
    }

    #[test]
    fn test_describe_unknown_entity() {
        assert!(describe(Some("invoice"), "", None).is_err());
    }
}
