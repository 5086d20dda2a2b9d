//! Order completion.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use chrono::{DateTime, Utc};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Complete {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Complete {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Complete {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Complete {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Complete",
        table: "complete",
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

/// Transfer shape of [`Complete`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDto {
    pub id: Option<i64>,
    pub order_id: Option<String>,
    pub explanation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for CompleteDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CompleteDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CompleteMapper;

impl EntityMapper for CompleteMapper {
    type Entity = Complete;
    type Dto = CompleteDto;

    fn to_dto(entity: &Complete) -> CompleteDto {
        CompleteDto {
            id: entity.id,
            order_id: entity.order_id.clone(),
            explanation: entity.explanation.clone(),
            created_at: entity.created_at,
        }
    }

    fn to_entity(dto: &CompleteDto) -> Complete {
        Complete {
            id: dto.id,
            order_id: dto.order_id.clone(),
            explanation: dto.explanation.clone(),
            created_at: dto.created_at,
        }
    }

    fn partial_update(entity: &mut Complete, dto: &CompleteDto) {
        merge(&mut entity.order_id, &dto.order_id);
        merge(&mut entity.explanation, &dto.explanation);
        merge(&mut entity.created_at, &dto.created_at);
    }
}

impl Entity for Complete {
    type Dto = CompleteDto;
    type Mapper = CompleteMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::assert_equality_contract;
    use chrono::NaiveDate;
    use column_core::{ColumnValue, InternalRow};

    #[test]
    fn test_equals_verifier() {
        assert_equality_contract(|id| Complete {
            id,
            ..Default::default()
        });
    }

    #[test]
    fn test_from_row_without_prefix() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let row = InternalRow::builder()
            .column("id", ColumnValue::SmallInt(8))
            .column("order_id", "ord-8")
            .column("explanation", ColumnValue::Null)
            .column("created_at", ColumnValue::Date(day))
            .build();

        let complete = Complete::from_row(&row, "").unwrap();
        assert_eq!(complete.id, Some(8));
        assert_eq!(
            complete.created_at.map(|dt| dt.date_naive()),
            Some(day)
        );
    }

    #[test]
    fn test_dto_json_is_camel_case() {
        let dto = CompleteMapper::to_dto(&Complete {
            id: Some(8),
            order_id: Some("ord-8".into()),
            ..Default::default()
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["orderId"], "ord-8");
        assert!(json["createdAt"].is_null());
    }
}
