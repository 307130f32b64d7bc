mod common;

use axum::http::StatusCode;
use chrono::{NaiveDate, TimeZone, Utc};
use diesel::pg::PgConnection;
use diesel::result::{DatabaseErrorKind, Error};

use datawhere_api::models::{
    DimDate, NewAnalyticsMetric, NewDataUpload, NewDimCustomer, NewDimProduct, NewDimRegion,
    NewFactSale, NewQueryRecord, NewUser, QueryType, UploadStatus,
};
use datawhere_api::repository::{history, metrics, users, warehouse};

use common::{get_json, TestSchema};

struct Keys {
    date: i32,
    product: i32,
    region: i32,
    customer: i32,
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.into(),
        full_name: "Dana Analyst".into(),
        company: "Acme Retail".into(),
        hashed_password: "$argon2id$v=19$placeholder".into(),
    }
}

fn product(product_id: &str) -> NewDimProduct {
    NewDimProduct {
        product_id: product_id.into(),
        product_name: "Trail Shoe".into(),
        category: "Footwear".into(),
        subcategory: None,
        unit_cost: 42.0,
    }
}

fn seed_dimensions(conn: &mut PgConnection) -> Keys {
    let date = warehouse::insert_date(conn, &DimDate::from_date(NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()))
        .unwrap();
    let product = warehouse::insert_product(conn, &product("P-100")).unwrap();
    let region = warehouse::insert_region(
        conn,
        &NewDimRegion {
            region_id: "EU-W".into(),
            region_name: "Western Europe".into(),
            country: "France".into(),
            continent: "Europe".into(),
        },
    )
    .unwrap();
    let customer = warehouse::insert_customer(
        conn,
        &NewDimCustomer {
            customer_id: "C-1".into(),
            customer_name: "Boulangerie Martin".into(),
            customer_segment: "SMB".into(),
            customer_type: "retail".into(),
        },
    )
    .unwrap();

    Keys {
        date: date.date_key,
        product: product.product_key,
        region: region.region_key,
        customer: customer.customer_key,
    }
}

fn sale(keys: &Keys, quantity: i32) -> NewFactSale {
    NewFactSale {
        date_key: keys.date,
        product_key: keys.product,
        region_key: keys.region,
        customer_key: keys.customer,
        quantity,
        unit_price: 80.0,
        total_amount: 80.0 * quantity as f64,
        discount: None,
    }
}

#[test]
fn user_defaults_are_applied_by_the_database() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let user = users::create_user(&mut conn, &new_user("dana@example.com")).unwrap();
    assert!(user.is_active);
    assert_eq!(user.created_at, user.updated_at);

    let found = users::find_user_by_email(&mut conn, "dana@example.com").unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(users::find_user_by_email(&mut conn, "nobody@example.com").unwrap().is_none());

    let touched = users::touch_user(&mut conn, user.id).unwrap();
    assert_eq!(touched.id, user.id);
    assert_eq!(touched.created_at, user.created_at);
    assert_ne!(touched.updated_at, user.updated_at);
}

#[test]
fn duplicate_email_is_rejected() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    users::create_user(&mut conn, &new_user("dup@example.com")).unwrap();
    let err = users::create_user(&mut conn, &new_user("dup@example.com")).unwrap_err();
    assert!(matches!(err, Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)));
}

#[test]
fn upload_starts_pending_and_terminal_status_stamps_processed_at() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let user = users::create_user(&mut conn, &new_user("uploader@example.com")).unwrap();
    let upload = history::create_upload(
        &mut conn,
        &NewDataUpload {
            user_id: user.id,
            file_name: "q1_sales.csv".into(),
            file_size: 18_432,
            row_count: 250,
            column_names: serde_json::json!(["date", "product_id", "region", "revenue", "units"]),
        },
    )
    .unwrap();
    assert_eq!(upload.status(), Ok(UploadStatus::Pending));
    assert!(upload.processed_at.is_none());

    let processing = history::set_upload_status(&mut conn, upload.id, UploadStatus::Processing).unwrap();
    assert_eq!(processing.status, "processing");
    assert!(processing.processed_at.is_none());

    let done = history::set_upload_status(&mut conn, upload.id, UploadStatus::Completed).unwrap();
    assert_eq!(done.status(), Ok(UploadStatus::Completed));
    assert!(done.processed_at.is_some());
}

#[test]
fn upload_for_unknown_user_violates_foreign_key() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let err = history::create_upload(
        &mut conn,
        &NewDataUpload {
            user_id: 9_999,
            file_name: "orphan.csv".into(),
            file_size: 1,
            row_count: 0,
            column_names: serde_json::json!([]),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)));
}

#[test]
fn fact_row_requires_existing_dimensions() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let keys = seed_dimensions(&mut conn);
    let missing_product = Keys { product: keys.product + 1_000, ..keys };

    let err = warehouse::insert_fact_sale(&mut conn, &sale(&missing_product, 1)).unwrap_err();
    assert!(matches!(err, Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)));
    assert_eq!(warehouse::count_fact_sales(&mut conn).unwrap(), 0);
}

#[test]
fn fact_discount_defaults_to_zero() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let keys = seed_dimensions(&mut conn);
    let plain = warehouse::insert_fact_sale(&mut conn, &sale(&keys, 2)).unwrap();
    assert_eq!(plain.discount, 0.0);

    let discounted = warehouse::insert_fact_sale(
        &mut conn,
        &NewFactSale { discount: Some(0.15), ..sale(&keys, 1) },
    )
    .unwrap();
    assert_eq!(discounted.discount, 0.15);
}

#[test]
fn dimension_natural_keys_are_unique() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let mut conn = schema.connect();

    let first = warehouse::insert_product(&mut conn, &product("P-777")).unwrap();
    assert!(first.is_active);

    let err = warehouse::insert_product(&mut conn, &product("P-777")).unwrap_err();
    assert!(matches!(err, Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)));

    let found = warehouse::find_product_by_natural_key(&mut conn, "P-777").unwrap().unwrap();
    assert_eq!(found.product_key, first.product_key);
    assert!(warehouse::find_product_by_natural_key(&mut conn, "P-000").unwrap().is_none());
}

#[tokio::test]
async fn warehouse_endpoint_joins_every_dimension() {
    let Some(schema) = TestSchema::warehouse() else { return };
    {
        let mut conn = schema.connect();
        let keys = seed_dimensions(&mut conn);
        for quantity in 1..=3 {
            warehouse::insert_fact_sale(&mut conn, &sale(&keys, quantity)).unwrap();
        }
    }

    let (status, body) =
        get_json(schema.router(), "/api/warehouse/sales?page=2&per_page=2").await;
    assert_eq!(status, StatusCode::OK);

    let page = &body["data"];
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["page"], 2);

    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["sale"]["quantity"], 3);
    assert_eq!(items[0]["date"]["full_date"], "2025-04-09");
    assert_eq!(items[0]["product"]["product_id"], "P-100");
    assert_eq!(items[0]["region"]["continent"], "Europe");
    assert_eq!(items[0]["customer"]["customer_id"], "C-1");
}

#[tokio::test]
async fn user_history_endpoints() {
    let Some(schema) = TestSchema::warehouse() else { return };
    let user_id = {
        let mut conn = schema.connect();
        let user = users::create_user(&mut conn, &new_user("history@example.com")).unwrap();
        for name in ["jan.csv", "feb.csv"] {
            history::create_upload(
                &mut conn,
                &NewDataUpload {
                    user_id: user.id,
                    file_name: name.into(),
                    file_size: 10,
                    row_count: 1,
                    column_names: serde_json::json!(["date"]),
                },
            )
            .unwrap();
        }
        let mut query = NewQueryRecord::new(user.id, QueryType::AiAssistant, "top regions by revenue");
        query.results = Some(serde_json::json!({ "top": "EMEA" }));
        query.execution_time_ms = Some(12.5);
        history::record_query(&mut conn, &query).unwrap();
        user.id
    };

    let app = schema.router();

    let (status, body) = get_json(app.clone(), &format!("/api/users/{user_id}/uploads")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["file_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["feb.csv", "jan.csv"]);
    assert_eq!(body["data"][0]["status"], "pending");

    let (status, body) = get_json(app.clone(), &format!("/api/users/{user_id}/queries")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["query_type"], "ai_assistant");
    assert_eq!(body["data"][0]["results"]["top"], "EMEA");

    let (status, body) = get_json(app, "/api/users/424242/uploads").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "E0003");
}

#[tokio::test]
async fn metric_series_is_ordered_by_date() {
    let Some(schema) = TestSchema::warehouse() else { return };
    {
        let mut conn = schema.connect();
        for (day, value) in [(3, 1_250.0), (1, 980.0), (2, 1_100.0)] {
            metrics::record_metric(
                &mut conn,
                &NewAnalyticsMetric {
                    metric_name: "daily_revenue".into(),
                    metric_value: value,
                    metric_type: "revenue".into(),
                    date: Utc.with_ymd_and_hms(2025, 5, day, 0, 0, 0).unwrap(),
                    metadata: Some(serde_json::json!({ "currency": "EUR" })),
                },
            )
            .unwrap();
        }
    }

    let (status, body) = get_json(schema.router(), "/api/metrics/daily_revenue").await;
    assert_eq!(status, StatusCode::OK);
    let values: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["metric_value"].as_f64().unwrap())
        .collect();
    assert_eq!(values, vec![980.0, 1_100.0, 1_250.0]);

    let (_, body) = get_json(schema.router(), "/api/metrics/unknown").await;
    assert_eq!(body["data"], serde_json::json!([]));
}
