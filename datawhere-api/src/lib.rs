pub mod config;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use datawhere_shared::clients::db::ConnectionProvider;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub db: ConnectionProvider,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let db = ConnectionProvider::new(config.database_url.clone());
        Self { config, db }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health_check))
        .route("/api/sales", get(routes::sales::get_sales))
        .route("/api/sales/summary", get(routes::sales::get_summary))
        .route("/api/sales/search", get(routes::sales::search_sales))
        .route("/api/warehouse/sales", get(routes::warehouse::list_sales))
        .route("/api/users/:id/uploads", get(routes::users::list_uploads))
        .route("/api/users/:id/queries", get(routes::users::list_queries))
        .route("/api/metrics/:name", get(routes::metrics::get_metric_series))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(datawhere_shared::middleware::catch_panic_layer())
        .with_state(state)
}
