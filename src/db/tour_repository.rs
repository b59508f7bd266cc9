use crate::error::Result;
use crate::models::{ActivityListing, BoundingBox, Location};
use async_trait::async_trait;

/// Read access to locations for the proximity prefilter.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Locations strictly inside `bbox`.
    async fn find_in_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Location>>;
}

/// Read access to activities joined with their presentation context.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// One listing per (activity, location) link for the given locations.
    async fn find_offered_at(&self, location_ids: &[i64]) -> Result<Vec<ActivityListing>>;

    /// Activities whose name or description contains `term`, ignoring case,
    /// one listing per activity in id order.
    async fn search(&self, term: &str) -> Result<Vec<ActivityListing>>;
}

pub struct PgTourRepository {
    pool: sqlx::PgPool,
}

impl PgTourRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for PgTourRepository {
    async fn find_in_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Location>> {
        Ok(super::tour_queries::find_locations_in_bbox(&self.pool, bbox).await?)
    }
}

#[async_trait]
impl ActivityStore for PgTourRepository {
    async fn find_offered_at(&self, location_ids: &[i64]) -> Result<Vec<ActivityListing>> {
        if location_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(super::tour_queries::find_activities_at_locations(&self.pool, location_ids).await?)
    }

    async fn search(&self, term: &str) -> Result<Vec<ActivityListing>> {
        Ok(super::tour_queries::search_activities(&self.pool, term).await?)
    }
}
