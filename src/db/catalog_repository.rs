use crate::error::{AppError, Result};
use crate::models::{CatalogEntry, EntityDraft, EntityKind, ListFilter};
use async_trait::async_trait;

/// Uniform create / update / list over every catalog entity kind.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create(&self, draft: &EntityDraft) -> Result<CatalogEntry>;

    /// Fails with `NotFound` when no row of the draft's kind has this id.
    async fn update(&self, id: i64, draft: &EntityDraft) -> Result<CatalogEntry>;

    async fn list(&self, kind: EntityKind, filter: &ListFilter) -> Result<Vec<CatalogEntry>>;
}

pub struct PgCatalogRepository {
    pool: sqlx::PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn create(&self, draft: &EntityDraft) -> Result<CatalogEntry> {
        super::catalog_queries::insert_entry(&self.pool, draft)
            .await
            .map_err(AppError::from_write)
    }

    async fn update(&self, id: i64, draft: &EntityDraft) -> Result<CatalogEntry> {
        super::catalog_queries::update_entry(&self.pool, id, draft)
            .await
            .map_err(AppError::from_write)?
            .ok_or_else(|| AppError::NotFound(format!("{} {} does not exist", draft.kind(), id)))
    }

    async fn list(&self, kind: EntityKind, filter: &ListFilter) -> Result<Vec<CatalogEntry>> {
        Ok(super::catalog_queries::list_entries(&self.pool, kind, filter).await?)
    }
}
