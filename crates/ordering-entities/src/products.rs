//! Menu products.
//!
//! The product image is stored as a binary column next to its content type.
//! Drivers may hand the image back as a large-object handle; it is read into
//! memory when the row is mapped.

use crate::dto_serde::option_base64;
use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Products {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub available: Option<bool>,
    /// Id of the owning [`Categories`](crate::Categories) row
    pub categories_id: Option<i64>,
}

impl Identified for Products {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Products {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Products {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Products",
        table: "products",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("name", TargetType::Text),
            FieldDescriptor::new("description", TargetType::Text),
            FieldDescriptor::new("price", TargetType::Decimal),
            FieldDescriptor::new("image", TargetType::Bytes),
            FieldDescriptor::new("image_content_type", TargetType::Text),
            FieldDescriptor::new("available", TargetType::Boolean),
            FieldDescriptor::new("categories_id", TargetType::Integer),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            name: r.get("name")?,
            description: r.get("description")?,
            price: r.get("price")?,
            image: r.get("image")?,
            image_content_type: r.get("image_content_type")?,
            available: r.get("available")?,
            categories_id: r.get("categories_id")?,
        })
    }
}

/// Transfer shape of [`Products`]. The image travels as base64.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(with = "option_base64", default)]
    pub image: Option<Vec<u8>>,
    pub image_content_type: Option<String>,
    pub available: Option<bool>,
    pub categories_id: Option<i64>,
}

impl Identified for ProductsDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for ProductsDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct ProductsMapper;

impl EntityMapper for ProductsMapper {
    type Entity = Products;
    type Dto = ProductsDto;

    fn to_dto(entity: &Products) -> ProductsDto {
        ProductsDto {
            id: entity.id,
            name: entity.name.clone(),
            description: entity.description.clone(),
            price: entity.price,
            image: entity.image.clone(),
            image_content_type: entity.image_content_type.clone(),
            available: entity.available,
            categories_id: entity.categories_id,
        }
    }

    fn to_entity(dto: &ProductsDto) -> Products {
        Products {
            id: dto.id,
            name: dto.name.clone(),
            description: dto.description.clone(),
            price: dto.price,
            image: dto.image.clone(),
            image_content_type: dto.image_content_type.clone(),
            available: dto.available,
            categories_id: dto.categories_id,
        }
    }

    fn partial_update(entity: &mut Products, dto: &ProductsDto) {
        merge(&mut entity.name, &dto.name);
        merge(&mut entity.description, &dto.description);
        merge(&mut entity.price, &dto.price);
        merge(&mut entity.image, &dto.image);
        merge(&mut entity.image_content_type, &dto.image_content_type);
        merge(&mut entity.available, &dto.available);
        merge(&mut entity.categories_id, &dto.categories_id);
    }
}

impl Entity for Products {
    type Dto = ProductsDto;
    type Mapper = ProductsMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
