//! Entities of the restaurant-ordering service.
//!
//! Each entity comes with:
//!
//! - a [`FromRow`](column_core::FromRow) implementation reading its columns
//!   under a caller-chosen prefix
//! - a serde DTO (`camelCase` JSON) and a mapper implementing [`EntityMapper`]
//! - identity equality: two values are equal only when both carry the same id
//!
//! [`CrudService`] exposes the usual create/read/update/delete operations on
//! DTOs over any [`Repository`], and [`EntityKind`] dispatches by entity name
//! for callers that only know the name at runtime.
//!
//! # Example
//!
//! ```rust
//! use column_core::{ColumnValue, FromRow, InternalRow};
//! use ordering_entities::{Cart, CartMapper, EntityMapper};
//!
//! let row = InternalRow::builder()
//!     .column("c_id", 1i64)
//!     .column("c_customer_id", "cust-1")
//!     .column("c_product_id", 7i64)
//!     .column("c_quantity", ColumnValue::Double(2.0))
//!     .column("c_price", "3.50")
//!     .column("c_checked_out", ColumnValue::Int(0))
//!     .build();
//!
//! let cart = Cart::from_row(&row, "c").unwrap();
//! let dto = CartMapper::to_dto(&cart);
//! assert_eq!(dto.quantity, Some(2));
//! assert_eq!(dto.checked_out, Some(false));
//! ```

pub mod cancel;
pub mod cart;
pub mod catalogue;
pub mod categories;
pub mod close;
pub mod complete;
pub mod customer_profile;
mod dto_serde;
pub mod entity;
pub mod new_order;
pub mod on_hold;
pub mod payment;
pub mod products;
pub mod refunded;
pub mod service;

pub use cancel::{Cancel, CancelDto, CancelMapper};
pub use cart::{Cart, CartDto, CartMapper};
pub use catalogue::{catalogue_schema, CatalogueError, EntityKind};
pub use categories::{Categories, CategoriesDto, CategoriesMapper};
pub use close::{Close, CloseDto, CloseMapper};
pub use complete::{Complete, CompleteDto, CompleteMapper};
pub use customer_profile::{CustomerProfile, CustomerProfileDto, CustomerProfileMapper};
pub use entity::{Entity, EntityMapper, Identified};
pub use new_order::{NewOrder, NewOrderDto, NewOrderMapper};
pub use on_hold::{OnHold, OnHoldDto, OnHoldMapper};
pub use payment::{Payment, PaymentDto, PaymentMapper};
pub use products::{Products, ProductsDto, ProductsMapper};
pub use refunded::{Refunded, RefundedDto, RefundedMapper};
pub use service::{CrudService, Page, Repository, ServiceError};
