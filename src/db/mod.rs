use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

mod catalog_queries;
pub mod catalog_repository;
mod tour_queries;
pub mod tour_repository;

/// Re-export all query functions under `queries`
pub mod queries {
    pub use super::catalog_queries::*;
    pub use super::tour_queries::*;
}

pub use catalog_repository::{CatalogRepository, PgCatalogRepository};
pub use tour_repository::{ActivityStore, LocationStore, PgTourRepository};

pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout_secs: u64,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .connect(database_url)
        .await
}
