use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use datawhere_shared::errors::{AppError, AppResult, ErrorCode};
use datawhere_shared::types::api::ApiResponse;

use crate::repository::sales::{self, SalesFilter, SalesSummary};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub count: usize,
    pub data: Vec<serde_json::Value>,
}

/// GET /api/sales
/// Every row of `fact_sales` ascending by date. One connection per request,
/// no pagination, no filtering. Any database failure is a generic 500.
pub async fn get_sales(State(state): State<Arc<AppState>>) -> AppResult<Json<SalesResponse>> {
    let data = state.db.run(sales::load_all).await?;
    tracing::debug!(rows = data.len(), "sales loaded");

    Ok(Json(SalesResponse {
        count: data.len(),
        data,
    }))
}

/// GET /api/sales/summary
/// Revenue and unit totals with per-region and per-month breakdowns.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<SalesSummary>>> {
    let summary = state.db.run(sales::summary).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

#[derive(Debug, Default, Deserialize)]
pub struct SalesSearchQuery {
    /// YYYY-MM-DD, inclusive
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusive
    pub end_date: Option<String>,
    pub region: Option<String>,
    pub product: Option<String>,
}

impl SalesSearchQuery {
    fn into_filter(self) -> AppResult<SalesFilter> {
        let start_date = parse_date("start_date", self.start_date)?;
        let end_date = parse_date("end_date", self.end_date)?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::bad_request(
                    "'start_date' must be before or equal to 'end_date'",
                ));
            }
        }

        Ok(SalesFilter {
            start_date,
            end_date,
            region: non_empty(self.region),
            product: non_empty(self.product),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(field: &str, value: Option<String>) -> AppResult<Option<NaiveDate>> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::with_details(
                    ErrorCode::BadRequest,
                    format!("invalid '{field}' date format, expected YYYY-MM-DD"),
                    serde_json::json!({ "field": field, "value": raw, "expected": "YYYY-MM-DD" }),
                )
            }),
    }
}

/// GET /api/sales/search?start_date=2025-01-01&end_date=2025-03-31&region=EMEA&product=P-100
/// Filtered sales, newest first.
pub async fn search_sales(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SalesSearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<serde_json::Value>>>> {
    let filter = query.into_filter()?;
    let rows = state
        .db
        .run(move |conn| sales::search(conn, &filter))
        .await?;

    Ok(Json(ApiResponse::ok(rows)))
}
