//! Generic CRUD service over any entity of the catalogue.
//!
//! The service only translates between DTOs and entities and forwards to a
//! [`Repository`]. Storage is supplied by the caller.

use crate::entity::{Entity, EntityMapper, Identified};
use async_trait::async_trait;
use std::marker::PhantomData;
use thiserror::Error;
use tracing::debug;

/// Errors returned by [`CrudService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0:#}")]
    Repository(#[from] anyhow::Error),

    #[error("Entity has no id")]
    IdMissing,

    #[error("Entity {0} not found")]
    NotFound(i64),
}

/// A page request. A `size` of 0 means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
}

impl Page {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Everything in one page.
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// Number of items before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Maximum number of items on this page, `None` if unlimited.
    pub fn limit(&self) -> Option<u64> {
        (self.size > 0).then_some(u64::from(self.size))
    }
}

/// Storage for one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert or update; returns the stored entity with its id assigned.
    async fn save(&self, entity: E) -> anyhow::Result<E>;

    async fn find_all(&self, page: Page) -> anyhow::Result<Vec<E>>;

    async fn count(&self) -> anyhow::Result<u64>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<E>>;

    async fn delete_by_id(&self, id: i64) -> anyhow::Result<()>;
}

/// DTO-facing service for entity `E` backed by repository `R`.
pub struct CrudService<E, R> {
    repository: R,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> CrudService<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Save a new entity.
    pub async fn save(&self, dto: E::Dto) -> Result<E::Dto, ServiceError> {
        debug!(entity = E::DESCRIPTOR.name, "save");
        let saved = self.repository.save(E::Mapper::to_entity(&dto)).await?;
        Ok(E::Mapper::to_dto(&saved))
    }

    /// Replace an existing entity. The DTO must carry an id.
    pub async fn update(&self, dto: E::Dto) -> Result<E::Dto, ServiceError> {
        let id = dto.id().ok_or(ServiceError::IdMissing)?;
        debug!(entity = E::DESCRIPTOR.name, id, "update");
        let saved = self.repository.save(E::Mapper::to_entity(&dto)).await?;
        Ok(E::Mapper::to_dto(&saved))
    }

    /// Copy the fields set in `dto` onto the stored entity with the same id.
    pub async fn partial_update(&self, dto: E::Dto) -> Result<E::Dto, ServiceError> {
        let id = dto.id().ok_or(ServiceError::IdMissing)?;
        debug!(entity = E::DESCRIPTOR.name, id, "partial update");
        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        E::Mapper::partial_update(&mut existing, &dto);
        let saved = self.repository.save(existing).await?;
        Ok(E::Mapper::to_dto(&saved))
    }

    pub async fn find_all(&self, page: Page) -> Result<Vec<E::Dto>, ServiceError> {
        debug!(entity = E::DESCRIPTOR.name, page = page.page, size = page.size, "find all");
        let entities = self.repository.find_all(page).await?;
        Ok(E::Mapper::to_dtos(&entities))
    }

    pub async fn count_all(&self) -> Result<u64, ServiceError> {
        Ok(self.repository.count().await?)
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<E::Dto>, ServiceError> {
        debug!(entity = E::DESCRIPTOR.name, id, "find one");
        let found = self.repository.find_by_id(id).await?;
        Ok(found.as_ref().map(E::Mapper::to_dto))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        debug!(entity = E::DESCRIPTOR.name, id, "delete");
        self.repository.delete_by_id(id).await?;
        Ok(())
    }
}
