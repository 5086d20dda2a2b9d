//! Traits shared by every entity of the ordering domain.

use column_core::FromRow;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Anything carrying an optional database identifier.
pub trait Identified {
    fn id(&self) -> Option<i64>;
}

/// Identity equality: two values are equal only if both carry an id and the
/// ids match. A value without an id is equal to nothing, itself included.
pub(crate) fn same_identity<T: Identified>(a: &T, b: &T) -> bool {
    matches!((a.id(), b.id()), (Some(x), Some(y)) if x == y)
}

/// Overwrite `target` with `source` when `source` is set.
pub(crate) fn merge<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

/// Copies between an entity and its DTO.
pub trait EntityMapper {
    type Entity;
    type Dto;

    fn to_dto(entity: &Self::Entity) -> Self::Dto;

    fn to_entity(dto: &Self::Dto) -> Self::Entity;

    /// Copy the fields that are set in `dto` onto `entity`, leaving the
    /// others untouched. The id is never changed.
    fn partial_update(entity: &mut Self::Entity, dto: &Self::Dto);

    fn to_dtos(entities: &[Self::Entity]) -> Vec<Self::Dto> {
        entities.iter().map(Self::to_dto).collect()
    }

    fn to_entities(dtos: &[Self::Dto]) -> Vec<Self::Entity> {
        dtos.iter().map(Self::to_entity).collect()
    }
}

/// An entity of the ordering domain: readable from a row, identified, and
/// paired with a DTO through its mapper.
pub trait Entity: FromRow + Identified + Clone + Send + Sync + 'static {
    type Dto: Identified + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Mapper: EntityMapper<Entity = Self, Dto = Self::Dto>;

    /// Return a copy of the entity with its id replaced.
    fn with_id(self, id: Option<i64>) -> Self;
}
