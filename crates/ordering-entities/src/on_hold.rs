//! Orders put on hold, e.g. while a payment is pending.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct OnHold {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for OnHold {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for OnHold {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for OnHold {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "OnHold",
        table: "on_hold",
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

/// Transfer shape of [`OnHold`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnHoldDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for OnHoldDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for OnHoldDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct OnHoldMapper;

impl EntityMapper for OnHoldMapper {
    type Entity = OnHold;
    type Dto = OnHoldDto;

    fn to_dto(entity: &OnHold) -> OnHoldDto {
        OnHoldDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            explanation: entity.explanation.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &OnHoldDto) -> OnHold {
        OnHold {
            id: dto.id,
            order_id: dto.order_id.clone(),
            explanation: dto.explanation.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut OnHold, dto: &OnHoldDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.explanation, &dto.explanation);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for OnHold {
    type Dto = OnHoldDto;
    type Mapper = OnHoldMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
