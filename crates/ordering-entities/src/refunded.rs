//! Refunds issued against an order.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Refunded {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    /// Amount returned to the customer
    pub amount: Option<Decimal>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Refunded {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Refunded {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Refunded {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Refunded",
        table: "refunded",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("order_id", TargetType::Text),
            FieldDescriptor::new("amount", TargetType::Decimal),
            FieldDescriptor::new("explanation", TargetType::Text),
            FieldDescriptor::new("created_at", TargetType::Instant),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            order_id: r.get("order_id")?,
            amount: r.get("amount")?,
            explanation: r.get("explanation")?,
            created_at: r.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundedDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub amount: Option<Decimal>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for RefundedDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for RefundedDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct RefundedMapper;

impl EntityMapper for RefundedMapper {
    type Entity = Refunded;
    type Dto = RefundedDto;

    fn to_dto(entity: &Refunded) -> RefundedDto {
        RefundedDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            amount: entity.amount,
            explanation: entity.explanation.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &RefundedDto) -> Refunded {
        Refunded {
            id: dto.id,
            order_id: dto.order_id.clone(),
            amount: dto.amount,
            explanation: dto.explanation.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut Refunded, dto: &RefundedDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.amount, &dto.amount);
        merge(&mut entity.explanation, &dto.explanation);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for Refunded {
    type Dto = RefundedDto;
    type Mapper = RefundedMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
