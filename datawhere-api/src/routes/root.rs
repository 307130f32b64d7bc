use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RootStatus {
    pub message: &'static str,
    pub status: &'static str,
}

/// GET /
/// Fixed banner. Does not touch the database.
pub async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        message: "DataWhere House API",
        status: "Connected to Supabase",
    })
}
