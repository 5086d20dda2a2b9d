//! Customer contact details, keyed by the external customer id.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct CustomerProfile {
    pub id: Option<i64>,
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for CustomerProfile {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CustomerProfile {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for CustomerProfile {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "CustomerProfile",
        table: "customer_profile",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("customer_id", TargetType::Text),
            FieldDescriptor::new("name", TargetType::Text),
            FieldDescriptor::new("email", TargetType::Text),
            FieldDescriptor::new("phone", TargetType::Text),
            FieldDescriptor::new("address", TargetType::Text),
            FieldDescriptor::new("created_at", TargetType::Instant),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            customer_id: r.get("customer_id")?,
            name: r.get("name")?,
            email: r.get("email")?,
            phone: r.get("phone")?,
            address: r.get("address")?,
            created_at: r.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfileDto {
    pub id: Option<i64>,
    pub customer_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for CustomerProfileDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CustomerProfileDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CustomerProfileMapper;

impl EntityMapper for CustomerProfileMapper {
    type Entity = CustomerProfile;
    type Dto = CustomerProfileDto;

    fn to_dto(entity: &CustomerProfile) -> CustomerProfileDto {
        CustomerProfileDto {
            id: entity.id,
            customer_id: entity.customer_id.clone(),
            name: entity.name.clone(),
            email: entity.email.clone(),
            phone: entity.phone.clone(),
            address: entity.address.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &CustomerProfileDto) -> CustomerProfile {
        CustomerProfile {
            id: dto.id,
            customer_id: dto.customer_id.clone(),
            name: dto.name.clone(),
            email: dto.email.clone(),
            phone: dto.phone.clone(),
            address: dto.address.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut CustomerProfile, dto: &CustomerProfileDto) {
        merge(&mut entity.customer_id, &dto.customer_id);
        merge(&mut entity.name, &dto.name);
        merge(&mut entity.email, &dto.email);
        merge(&mut entity.phone, &dto.phone);
        merge(&mut entity.address, &dto.address);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for CustomerProfile {
    type Dto = CustomerProfileDto;
    type Mapper = CustomerProfileMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
