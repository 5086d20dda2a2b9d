//! The built-in entity catalogue.
//!
//! [`EntityKind`] names every entity of the ordering domain and dispatches
//! generic work (decoding a row into a DTO, describing fields) to the
//! concrete Rust type.

use crate::entity::{Entity, EntityMapper};
use crate::{
    Cancel, Cart, Categories, Close, Complete, CustomerProfile, NewOrder, OnHold, Payment,
    Products, Refunded,
};
use column_core::{ConversionError, EntityDescriptor, EntitySchema, FromRow, Row, SchemaFile};
use std::fmt;
use thiserror::Error;

/// Errors from catalogue-driven decoding.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Failed to serialize DTO: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every entity of the ordering domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cancel,
    Close,
    Complete,
    OnHold,
    Refunded,
    Cart,
    Categories,
    Products,
    CustomerProfile,
    NewOrder,
    Payment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Cancel,
        EntityKind::Close,
        EntityKind::Complete,
        EntityKind::OnHold,
        EntityKind::Refunded,
        EntityKind::Cart,
        EntityKind::Categories,
        EntityKind::Products,
        EntityKind::CustomerProfile,
        EntityKind::NewOrder,
        EntityKind::Payment,
    ];

    /// Field list of the entity.
    pub fn descriptor(self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Cancel => &Cancel::DESCRIPTOR,
            EntityKind::Close => &Close::DESCRIPTOR,
            EntityKind::Complete => &Complete::DESCRIPTOR,
            EntityKind::OnHold => &OnHold::DESCRIPTOR,
            EntityKind::Refunded => &Refunded::DESCRIPTOR,
            EntityKind::Cart => &Cart::DESCRIPTOR,
            EntityKind::Categories => &Categories::DESCRIPTOR,
            EntityKind::Products => &Products::DESCRIPTOR,
            EntityKind::CustomerProfile => &CustomerProfile::DESCRIPTOR,
            EntityKind::NewOrder => &NewOrder::DESCRIPTOR,
            EntityKind::Payment => &Payment::DESCRIPTOR,
        }
    }

    /// Look an entity up by name or table name, ignoring case.
    ///
    /// `NewOrder`, `neworder` and `new_order` all resolve to
    /// [`EntityKind::NewOrder`].
    pub fn from_name(name: &str) -> Result<Self, CatalogueError> {
        Self::ALL
            .into_iter()
            .find(|kind| {
                let d = kind.descriptor();
                d.name.eq_ignore_ascii_case(name) || d.table.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| CatalogueError::UnknownEntity(name.to_string()))
    }

    /// Map one row into the entity and render its DTO as JSON.
    pub fn row_to_dto_json<R: Row + ?Sized>(
        self,
        row: &R,
        prefix: &str,
    ) -> Result<serde_json::Value, CatalogueError> {
        match self {
            EntityKind::Cancel => dto_json::<Cancel, R>(row, prefix),
            EntityKind::Close => dto_json::<Close, R>(row, prefix),
            EntityKind::Complete => dto_json::<Complete, R>(row, prefix),
            EntityKind::OnHold => dto_json::<OnHold, R>(row, prefix),
            EntityKind::Refunded => dto_json::<Refunded, R>(row, prefix),
            EntityKind::Cart => dto_json::<Cart, R>(row, prefix),
            EntityKind::Categories => dto_json::<Categories, R>(row, prefix),
            EntityKind::Products => dto_json::<Products, R>(row, prefix),
            EntityKind::CustomerProfile => dto_json::<CustomerProfile, R>(row, prefix),
            EntityKind::NewOrder => dto_json::<NewOrder, R>(row, prefix),
            EntityKind::Payment => dto_json::<Payment, R>(row, prefix),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

fn dto_json<E: Entity, R: Row + ?Sized>(
    row: &R,
    prefix: &str,
) -> Result<serde_json::Value, CatalogueError> {
    let entity = E::from_row(row, prefix)?;
    Ok(serde_json::to_value(E::Mapper::to_dto(&entity))?)
}

/// The whole catalogue as a schema file, e.g. for `describe`.
pub fn catalogue_schema() -> SchemaFile {
    SchemaFile {
        entities: EntityKind::ALL
            .iter()
            .map(|kind| EntitySchema::from(kind.descriptor()))
            .collect(),
    }
}
