//! Per-user upload and query history.

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error;

use crate::models::{DataUpload, NewDataUpload, NewQueryRecord, QueryRecord, UploadStatus, User};
use crate::schema::{data_uploads, queries};

pub const RECENT_LIMIT: i64 = 20;

// --- Uploads ---

pub fn create_upload(conn: &mut PgConnection, upload: &NewDataUpload) -> Result<DataUpload, Error> {
    diesel::insert_into(data_uploads::table)
        .values(upload)
        .returning(DataUpload::as_returning())
        .get_result(conn)
}

/// Moves an upload to `status`. Terminal statuses stamp `processed_at`.
pub fn set_upload_status(
    conn: &mut PgConnection,
    upload_id: i32,
    status: UploadStatus,
) -> Result<DataUpload, Error> {
    let processed_at = status.is_terminal().then(Utc::now);

    diesel::update(data_uploads::table.find(upload_id))
        .set((
            data_uploads::status.eq(status.as_str()),
            data_uploads::processed_at.eq(processed_at),
        ))
        .returning(DataUpload::as_returning())
        .get_result(conn)
}

pub fn uploads_for_user(
    conn: &mut PgConnection,
    user: &User,
    limit: i64,
) -> Result<Vec<DataUpload>, Error> {
    DataUpload::belonging_to(user)
        .select(DataUpload::as_select())
        .order((data_uploads::uploaded_at.desc(), data_uploads::id.desc()))
        .limit(limit)
        .load(conn)
}

// --- Queries ---

pub fn record_query(conn: &mut PgConnection, query: &NewQueryRecord) -> Result<QueryRecord, Error> {
    diesel::insert_into(queries::table)
        .values(query)
        .returning(QueryRecord::as_returning())
        .get_result(conn)
}

pub fn queries_for_user(
    conn: &mut PgConnection,
    user: &User,
    limit: i64,
) -> Result<Vec<QueryRecord>, Error> {
    QueryRecord::belonging_to(user)
        .select(QueryRecord::as_select())
        .order((queries::created_at.desc(), queries::id.desc()))
        .limit(limit)
        .load(conn)
}
