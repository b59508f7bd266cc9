pub mod catalog;
pub mod debug;
pub mod tours;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tours/nearby", post(tours::find_nearby_tours))
        .route("/tours/search", post(tours::search_tours))
        .route(
            "/catalog/{kind}",
            get(catalog::list_entries).post(catalog::create_entry),
        )
        .route("/catalog/{kind}/{id}", put(catalog::update_entry))
        .with_state(state)
}

/// Routes that talk to PostgreSQL directly
pub fn create_pg_router(pool: PgPool) -> Router {
    Router::new()
        .route("/debug/health", get(debug::health_check))
        .with_state(pool)
}
