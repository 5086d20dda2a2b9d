//! Shopping cart lines.
//!
//! One row per product a customer has put in their cart. `checked_out`
//! flips once the cart becomes an order; drivers commonly return it as a
//! bit or a 0/1 integer.

use crate::entity::{merge, same_identity, Entity, EntityMapper, Identified};
use column_core::{
    ConversionError, EntityDescriptor, FieldDescriptor, FromRow, Row, RowReader, TargetType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default)]
pub struct Cart {
    pub id: Option<i64>,
    pub customer_id: Option<String>,
    pub product_id: Option<i64>,
    pub quantity: Option<i32>,
    /// Unit price at the time the product was added
    pub price: Option<Decimal>,
    pub checked_out: Option<bool>,
}

impl Cart {
    /// Quantity times unit price, when both are known.
    pub fn line_total(&self) -> Option<Decimal> {
        Some(self.price? * Decimal::from(self.quantity?))
    }
}

impl Identified for Cart {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

impl FromRow for Cart {
    const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
        name: "Cart",
        table: "cart",
        fields: &[
            FieldDescriptor::new("id", TargetType::Integer),
            FieldDescriptor::new("customer_id", TargetType::Text),
            FieldDescriptor::new("product_id", TargetType::Integer),
            FieldDescriptor::new("quantity", TargetType::Integer),
            FieldDescriptor::new("price", TargetType::Decimal),
            FieldDescriptor::new("checked_out", TargetType::Boolean),
        ],
    };

    fn from_row<R: Row + ?Sized>(row: &R, prefix: &str) -> Result<Self, ConversionError> {
        let r = RowReader::new(row, prefix);
        Ok(Self {
            id: r.get("id")?,
            customer_id: r.get("customer_id")?,
            product_id: r.get("product_id")?,
            quantity: r.get("quantity")?,
            price: r.get("price")?,
            checked_out: r.get("checked_out")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub id: Option<i64>,
    pub customer_id: Option<String>,
    pub product_id: Option<i64>,
    pub quantity: Option<i32>,
    pub price: Option<Decimal>,
    pub checked_out: Option<bool>,
}

impl Identified for CartDto {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for CartDto {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self, other)
    }
}

pub struct CartMapper;

impl EntityMapper for CartMapper {
    type Entity = Cart;
    type Dto = CartDto;

    fn to_dto(entity: &Cart) -> CartDto {
        CartDto {
            id: entity.id,
            customer_id: entity.customer_id.clone(),
            product_id: entity.product_id,
            quantity: entity.quantity,
            price: entity.price,
            checked_out: entity.checked_out,
        }
    }

    fn to_entity(dto: &CartDto) -> Cart {
        Cart {
            id: dto.id,
            customer_id: dto.customer_id.clone(),
            product_id: dto.product_id,
            quantity: dto.quantity,
            price: dto.price,
            checked_out: dto.checked_out,
        }
    }

    fn partial_update(entity: &mut Cart, dto: &CartDto) {
        merge(&mut entity.customer_id, &dto.customer_id);
        merge(&mut entity.product_id, &dto.product_id);
        merge(&mut entity.quantity, &dto.quantity);
        merge(&mut entity.price, &dto.price);
        merge(&mut entity.checked_out, &dto.checked_out);
    }
}

impl Entity for Cart {
    type Dto = CartDto;
    type Mapper = CartMapper;

    fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::test_support::assert_equality_contract;
    use column_core::{ColumnValue, InternalRow};

    fn cart_row(checked_out: ColumnValue, quantity: ColumnValue) -> InternalRow {
        InternalRow::builder()
            .column("cart_id", ColumnValue::BigInt(11))
            .column("cart_customer_id", "cust-9")
            .column("cart_product_id", ColumnValue::Int(4))
            .column("cart_quantity", quantity)
            .column("cart_price", ColumnValue::Decimal(Decimal::new(450, 2)))
            .column("cart_checked_out", checked_out)
            .build()
    }

    #[test]
    fn test_equals_verifier() {
        assert_equality_contract(|id| Cart {
            id,
            ..Default::default()
        });
        assert_equality_contract(|id| CartDto {
            id,
            ..Default::default()
        });
    }

    #[test]
    fn test_boolean_column_variants() {
        for (raw, expected) in [
            (ColumnValue::Bit(true), true),
            (ColumnValue::TinyInt(0), false),
            (ColumnValue::Text("TRUE".into()), true),
        ] {
            let cart = Cart::from_row(&cart_row(raw, ColumnValue::Int(2)), "cart").unwrap();
            assert_eq!(cart.checked_out, Some(expected));
        }
    }

    #[test]
    fn test_line_total() {
        let cart = Cart::from_row(&cart_row(ColumnValue::Null, ColumnValue::Int(3)), "cart").unwrap();
        assert_eq!(cart.line_total(), Some(Decimal::new(1350, 2)));
        assert_eq!(Cart::default().line_total(), None);
    }

    #[test]
    fn test_quantity_overflow() {
        let row = cart_row(ColumnValue::Null, ColumnValue::BigInt(1 << 40));
        let err = Cart::from_row(&row, "cart").unwrap_err();
        assert!(matches!(err, ConversionError::OutOfRange { .. }));
        assert_eq!(err.column(), "cart_quantity");
    }

    #[test]
    fn test_invalid_boolean_fails_row() {
        let row = cart_row(ColumnValue::Int(5), ColumnValue::Int(1));
        let err = Cart::from_row(&row, "cart").unwrap_err();
        assert!(matches!(err, ConversionError::TypeMismatch { .. }));
    }
}
