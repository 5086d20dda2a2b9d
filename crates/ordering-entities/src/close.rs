//! Order closing.
//!
//! Written when the restaurant closes out an order after service.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Close {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Close {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Close {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Close {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Close",
        table: "close",
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

/// Transfer shape of [`Close`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for CloseDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CloseDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CloseMapper;

impl EntityMapper for CloseMapper {
    type Entity = Close;
    type Dto = CloseDto;

    fn to_dto(entity: &Close) -> CloseDto {
        CloseDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            explanation: entity.explanation.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &CloseDto) -> Close {
        Close {
            id: dto.id,
            order_id: dto.order_id.clone(),
            explanation: dto.explanation.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut Close, dto: &CloseDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.explanation, &dto.explanation);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for Close {
    type Dto = CloseDto;
    type Mapper = CloseMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
