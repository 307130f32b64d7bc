use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use datawhere_shared::errors::AppResult;
use datawhere_shared::types::api::ApiResponse;

use crate::models::AnalyticsMetric;
use crate::repository::metrics;
use crate::AppState;

/// GET /api/metrics/:name
/// All observations of one metric, oldest first. Unknown names yield an empty list.
pub async fn get_metric_series(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<AnalyticsMetric>>>> {
    let series = state
        .db
        .run(move |conn| metrics::metrics_by_name(conn, &name))
        .await?;

    Ok(Json(ApiResponse::ok(series)))
}
