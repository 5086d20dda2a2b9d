//! Payments recorded against an order.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Payment {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub amount: Option<Decimal>,
    /// Payment method as recorded by the till, e.g. `CARD` or `CASH`
    pub method: Option<String>,
    pub paid: Option<bool>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Identified for Payment {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Payment {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Payment {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Payment",
        table: "payment",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("order_id", TargetType::Text),
            FieldDescriptor::new("amount", TargetType::Decimal),
            FieldDescriptor::new("method", TargetType::Text),
            FieldDescriptor::new("paid", TargetType::Boolean),
            FieldDescriptor::new("paid_at", TargetType::Instant),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            order_id: r.get("order_id")?,
            amount: r.get("amount")?,
            method: r.get("method")?,
            paid: r.get("paid")?,
            paid_at: r.get("paid_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub paid: Option<bool>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Identified for PaymentDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for PaymentDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct PaymentMapper;

impl EntityMapper for PaymentMapper {
    type Entity = Payment;
    type Dto = PaymentDto;

    fn to_dto(entity: &Payment) -> PaymentDto {
        PaymentDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            amount: entity.amount,
            method: entity.method.clone(),
            paid: entity.paid,
            paid_at: entity.paid_at,
        }
    }

    fn to_entity(dto: &PaymentDto) -> Payment {
        Payment {
            id: dto.id,
            order_id: dto.order_id.clone(),
            amount: dto.amount,
            method: dto.method.clone(),
            paid: dto.paid,
            paid_at: dto.paid_at,
        }
    }

    fn partial_update(entity: &mut Payment, dto: &PaymentDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.amount, &dto.amount);
        merge(&mut entity.method, &dto.method);
        merge(&mut entity.paid, &dto.paid);
        merge(&mut entity.paid_at, &dto.paid_at);
    }
}

impl Entity for Payment {
    type Dto = PaymentDto;
    type Mapper = PaymentMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
