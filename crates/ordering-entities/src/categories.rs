//! Menu categories.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Categories {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl Identified for Categories {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Categories {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Categories {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Categories",
        table: "categories",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("name", TargetType::Text),
            FieldDescriptor::new("description", TargetType::Text),
            FieldDescriptor::new("active", TargetType::Boolean),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            name: r.get("name")?,
            description: r.get("description")?,
            active: r.get("active")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl Identified for CategoriesDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CategoriesDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CategoriesMapper;

impl EntityMapper for CategoriesMapper {
    type Entity = Categories;
    type Dto = CategoriesDto;

    fn to_dto(entity: &Categories) -> CategoriesDto {
        CategoriesDto {
            id: entity.id,
            name: entity.name.clone(),
            description: entity.description.clone(),
            active: entity.active,
        }
    }

    fn to_entity(dto: &CategoriesDto) -> Categories {
        Categories {
            id: dto.id,
            name: dto.name.clone(),
            description: dto.description.clone(),
            active: dto.active,
        }
    }

    fn partial_update(entity: &mut Categories, dto: &CategoriesDto) {
        merge(&mut entity.name, &dto.name);
        merge(&mut entity.description, &dto.description);
        merge(&mut entity.active, &dto.active);
    }
}

impl Entity for Categories {
    type Dto = CategoriesDto;
    type Mapper = CategoriesMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
