// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

// App state for sharing across the application
use db::CatalogRepository;
use services::TourFinder;
use std::sync::Arc;

pub struct AppState {
    pub tour_finder: TourFinder,
    pub catalog: Arc<dyn CatalogRepository>,
}
