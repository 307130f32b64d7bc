//! Isolated PostgreSQL schemas for integration tests. Every helper returns
//! `None` when `DATABASE_URL` is not set so the suite can run without a
//! database. With `DATAWHERE_REQUIRE_DB` set (CI), a missing `DATABASE_URL`
//! fails the test instead.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::Connection;
use tower::ServiceExt;

use datawhere_api::config::AppConfig;
use datawhere_api::{build_router, migrations, AppState};

/// DDL of the table the running service reads from.
pub const LIVE_FACT_SALES: &str = "CREATE TABLE fact_sales (
    date DATE NOT NULL,
    product_id VARCHAR NOT NULL,
    region VARCHAR NOT NULL,
    revenue NUMERIC(12, 2) NOT NULL,
    units INTEGER NOT NULL
)";

/// Same columns without NOT NULL; the deployed table does not guarantee them.
pub const LIVE_FACT_SALES_NULLABLE: &str = "CREATE TABLE fact_sales (
    date DATE,
    product_id VARCHAR,
    region VARCHAR,
    revenue NUMERIC(12, 2),
    units INTEGER
)";

pub fn resolve_database_url(url: Option<String>, required: bool) -> Option<String> {
    match url.filter(|u| !u.trim().is_empty()) {
        Some(url) => Some(url),
        None if required => panic!("DATABASE_URL must be set when DATAWHERE_REQUIRE_DB is set"),
        None => {
            eprintln!("DATABASE_URL not set - skipping database test");
            None
        }
    }
}

pub struct TestSchema {
    name: String,
    admin_url: String,
    pub database_url: String,
}

impl TestSchema {
    fn create() -> Option<Self> {
        let admin_url = resolve_database_url(
            std::env::var("DATABASE_URL").ok(),
            std::env::var_os("DATAWHERE_REQUIRE_DB").is_some(),
        )?;

        let name = format!("dwh_test_{}", uuid::Uuid::new_v4().simple());
        let mut conn = PgConnection::establish(&admin_url).expect("connect to DATABASE_URL");
        conn.batch_execute(&format!("CREATE SCHEMA {name}"))
            .expect("create test schema");

        let separator = if admin_url.contains('?') { '&' } else { '?' };
        let database_url = format!("{admin_url}{separator}options=-c%20search_path%3D{name}");

        Some(Self { name, admin_url, database_url })
    }

    /// Schema with the star model applied through the embedded migrations.
    pub fn warehouse() -> Option<Self> {
        let schema = Self::create()?;
        let mut conn = schema.connect();
        migrations::run_pending_migrations(&mut conn).expect("run migrations");
        Some(schema)
    }

    /// Schema holding only the live-shaped `fact_sales` table.
    pub fn live_sales() -> Option<Self> {
        Self::with_table(LIVE_FACT_SALES)
    }

    /// Live-shaped `fact_sales` whose columns all accept NULL.
    pub fn nullable_live_sales() -> Option<Self> {
        Self::with_table(LIVE_FACT_SALES_NULLABLE)
    }

    fn with_table(ddl: &str) -> Option<Self> {
        let schema = Self::create()?;
        schema.connect().batch_execute(ddl).expect("create live fact_sales");
        Some(schema)
    }

    pub fn connect(&self) -> PgConnection {
        PgConnection::establish(&self.database_url).expect("connect to test schema")
    }

    pub fn router(&self) -> Router {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: self.database_url.clone(),
            run_migrations: false,
        };
        build_router(Arc::new(AppState::new(config)))
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        if let Ok(mut conn) = PgConnection::establish(&self.admin_url) {
            let _ = conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name));
        }
    }
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}
