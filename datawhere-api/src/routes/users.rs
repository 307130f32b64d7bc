use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use datawhere_shared::errors::{AppError, AppResult};
use datawhere_shared::types::api::ApiResponse;

use crate::models::{DataUpload, QueryRecord};
use crate::repository::{history, users};
use crate::AppState;

/// GET /api/users/:id/uploads
/// The user's most recent uploads, newest first.
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<DataUpload>>>> {
    let uploads = state
        .db
        .run(move |conn| -> AppResult<Vec<DataUpload>> {
            let user = users::find_user(conn, user_id)?
                .ok_or_else(|| AppError::not_found("user not found"))?;
            Ok(history::uploads_for_user(conn, &user, history::RECENT_LIMIT)?)
        })
        .await?;

    Ok(Json(ApiResponse::ok(uploads)))
}

/// GET /api/users/:id/queries
/// The user's most recent analytics and assistant queries, newest first.
pub async fn list_queries(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<QueryRecord>>>> {
    let queries = state
        .db
        .run(move |conn| -> AppResult<Vec<QueryRecord>> {
            let user = users::find_user(conn, user_id)?
                .ok_or_else(|| AppError::not_found("user not found"))?;
            Ok(history::queries_for_user(conn, &user, history::RECENT_LIMIT)?)
        })
        .await?;

    Ok(Json(ApiResponse::ok(queries)))
}
