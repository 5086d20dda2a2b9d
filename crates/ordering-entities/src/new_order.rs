//! Orders as placed by the customer, before any lifecycle transition.
//!
//! `estimated_duration` is the kitchen's estimate in minutes. It is a
//! floating point column; integer-typed sources are widened.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub store_id: Option<String>,
    pub order_state: Option<String>,
    pub total: Option<Decimal>,
    pub estimated_duration: Option<f64>,
    pub placed_at: Option<DateTime<Utc>>,
}

impl NewOrder {
    /// When the order should be ready, given the placement time and estimate.
    pub fn estimated_ready_at(&self) -> Option<DateTime<Utc>> {
        let minutes = self.estimated_duration?;
        if !minutes.is_finite() {
            return None;
        }
        let delta = chrono::Duration::milliseconds((minutes * 60_000.0).round() as i64);
        self.placed_at?.checked_add_signed(delta)
    }
}

impl Identified for NewOrder {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for NewOrder {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for NewOrder {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "NewOrder",
        table: "new_order",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("order_id", TargetType::Text),
            FieldDescriptor::new("customer_id", TargetType::Text),
            FieldDescriptor::new("store_id", TargetType::Text),
            FieldDescriptor::new("order_state", TargetType::Text),
            FieldDescriptor::new("total", TargetType::Decimal),
            FieldDescriptor::new("estimated_duration", TargetType::Float),
            FieldDescriptor::new("placed_at", TargetType::Instant),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            order_id: r.get("order_id")?,
            customer_id: r.get("customer_id")?,
            store_id: r.get("store_id")?,
            order_state: r.get("order_state")?,
            total: r.get("total")?,
            estimated_duration: r.get("estimated_duration")?,
            placed_at: r.get("placed_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub store_id: Option<String>,
    pub order_state: Option<String>,
    pub total: Option<Decimal>,
    pub estimated_duration: Option<f64>,
    pub placed_at: Option<DateTime<Utc>>,
}

impl Identified for NewOrderDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for NewOrderDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct NewOrderMapper;

impl EntityMapper for NewOrderMapper {
    type Entity = NewOrder;
    type Dto = NewOrderDto;

    fn to_dto(entity: &NewOrder) -> NewOrderDto {
        NewOrderDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            customer_id: entity.customer_id.clone(),
            store_id: entity.store_id.clone(),
            order_state: entity.order_state.clone(),
            total: entity.total,
            estimated_duration: entity.estimated_duration,
            placed_at: entity.placed_at,
        }
    }

    fn to_entity(dto: &NewOrderDto) -> NewOrder {
        NewOrder {
            id: dto.id,
            order_id: dto.order_id.clone(),
            customer_id: dto.customer_id.clone(),
            store_id: dto.store_id.clone(),
            order_state: dto.order_state.clone(),
            total: dto.total,
            estimated_duration: dto.estimated_duration,
            placed_at: dto.placed_at,
        }
    }

    fn partial_update(entity: &mut NewOrder, dto: &NewOrderDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.customer_id, &dto.customer_id);
        merge(&mut entity.store_id, &dto.store_id);
        merge(&mut entity.order_state, &dto.order_state);
        merge(&mut entity.total, &dto.total);
        merge(&mut entity.estimated_duration, &dto.estimated_duration);
        merge(&mut entity.placed_at, &dto.placed_at);
    }
}

impl Entity for NewOrder {
    type Dto = NewOrderDto;
    type Mapper = NewOrderMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
