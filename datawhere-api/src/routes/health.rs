use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use datawhere_shared::{HealthCheck, HealthResponse};
use diesel::connection::SimpleConnection;

use crate::AppState;

/// GET /health
/// Opens a fresh connection and runs `SELECT 1`.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let database = match state.db.run(|conn| conn.batch_execute("SELECT 1")).await {
        Ok(()) => HealthCheck::healthy("database"),
        Err(e) => {
            tracing::warn!(error = %e, "database health probe failed");
            HealthCheck::unhealthy("database", "database unreachable")
        }
    };

    let report = HealthResponse::new("datawhere-api", env!("CARGO_PKG_VERSION"), vec![database]);
    (report.http_status(), Json(report)).into_response()
}
