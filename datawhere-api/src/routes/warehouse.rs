use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use datawhere_shared::errors::{AppError, AppResult};
use datawhere_shared::types::api::ApiResponse;
use datawhere_shared::types::pagination::{PaginationParams, Paginated};

use crate::models::SaleDetail;
use crate::repository::warehouse;
use crate::AppState;

/// GET /api/warehouse/sales?page=1&per_page=20
/// Star-schema facts with their date, product, region and customer rows.
pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<SaleDetail>>>> {
    // OFFSET is a signed BIGINT on the server side.
    let offset = i64::try_from(params.offset())
        .map_err(|_| AppError::bad_request("'page' is out of range"))?;
    let limit = params.limit() as i64;

    let (total, items) = state
        .db
        .run(move |conn| -> Result<(i64, Vec<SaleDetail>), diesel::result::Error> {
            let total = warehouse::count_fact_sales(conn)?;
            let items = warehouse::sales_with_dimensions(conn, offset, limit)?;
            Ok((total, items))
        })
        .await?;

    Ok(Json(ApiResponse::ok(Paginated::new(items, total as u64, &params))))
}
