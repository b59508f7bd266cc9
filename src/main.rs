use axum::Router;
use std::sync::Arc;
use tourfinder::config::Config;
use tourfinder::db::{CatalogRepository, PgCatalogRepository, PgTourRepository};
use tourfinder::services::TourFinder;
use tourfinder::AppState;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourfinder=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting tour finder API server");
    tracing::info!(
        bbox_margin_factor = config.tour_finder.bbox_margin_factor,
        distance_formula = ?config.tour_finder.distance_formula,
        "Configuration loaded successfully"
    );

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = tourfinder::db::create_pool(
        &config.database_url,
        config.db_max_connections,
        config.db_acquire_timeout_secs,
    )
    .await?;
    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize services
    let tour_repo = Arc::new(PgTourRepository::new(db_pool.clone()));
    let tour_finder = TourFinder::new(tour_repo.clone(), tour_repo, config.tour_finder.clone());
    let catalog: Arc<dyn CatalogRepository> = Arc::new(PgCatalogRepository::new(db_pool.clone()));

    // Create application state
    let state = Arc::new(AppState {
        tour_finder,
        catalog,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest(
            "/api/v1",
            tourfinder::routes::create_router(state)
                .merge(tourfinder::routes::create_pg_router(db_pool)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
