//! Order cancellation.
//!
//! A `Cancel` record is written when an order moves to the cancelled state.
//! It carries the order it refers to and a free-text explanation.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Cancel {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Cancel {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Cancel {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Cancel {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Cancel",
        table: "cancel",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("order_id", TargetType::Text),
            FieldDescriptor::new("explanation", TargetType::Text),
            FieldDescriptor::new("created_at", TargetType::Instant),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            order_id: r.get("order_id")?,
            explanation: r.get("explanation")?,
            created_at: r.get("created_at")?,
        })
    }
}

/// Transfer shape of [`Cancel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for CancelDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CancelDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CancelMapper;

impl EntityMapper for CancelMapper {
    type Entity = Cancel;
    type Dto = CancelDto;

    fn to_dto(entity: &Cancel) -> CancelDto {
        CancelDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            explanation: entity.explanation.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &CancelDto) -> Cancel {
        Cancel {
            id: dto.id,
            order_id: dto.order_id.clone(),
            explanation: dto.explanation.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut Cancel, dto: &CancelDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.explanation, &dto.explanation);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for Cancel {
    type Dto = CancelDto;
    type Mapper = CancelMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
