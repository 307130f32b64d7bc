//! Reads against the live `fact_sales` shape: `date, product_id, region,
//! revenue, units`. This is not the star-model `fact_sales` declared in
//! `schema.rs`; the two column sets do not overlap (see DESIGN.md).
//!
//! Rows come back as JSON objects keyed by column name, so the API does not
//! depend on the concrete column types of the live table.

use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error;
use diesel::sql_types::{BigInt, Date, Double, Json, Nullable, Text};
use serde::Serialize;

/// The column projection the API contract is built on.
pub const SALES_PROJECTION: &str =
    "SELECT date, product_id, region, revenue, units FROM fact_sales";

#[derive(Debug, QueryableByName)]
struct SalesRow {
    #[diesel(sql_type = Json)]
    row: serde_json::Value,
}

/// Every sale, ascending by `date`.
pub fn load_all(conn: &mut PgConnection) -> Result<Vec<serde_json::Value>, Error> {
    let rows = diesel::sql_query(format!(
        "SELECT row_to_json(s) AS row FROM ({SALES_PROJECTION}) s ORDER BY s.date ASC"
    ))
    .load::<SalesRow>(conn)?;

    Ok(rows.into_iter().map(|r| r.row).collect())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub region: Option<String>,
    pub product: Option<String>,
}

/// Sales matching every supplied bound, newest first. Date bounds are
/// inclusive; absent fields do not filter.
pub fn search(conn: &mut PgConnection, filter: &SalesFilter) -> Result<Vec<serde_json::Value>, Error> {
    let rows = diesel::sql_query(format!(
        "SELECT row_to_json(s) AS row FROM ({SALES_PROJECTION}) s \
         WHERE ($1::date IS NULL OR s.date >= $1) \
         AND ($2::date IS NULL OR s.date <= $2) \
         AND ($3::text IS NULL OR s.region = $3) \
         AND ($4::text IS NULL OR s.product_id = $4) \
         ORDER BY s.date DESC"
    ))
    .bind::<Nullable<Date>, _>(filter.start_date)
    .bind::<Nullable<Date>, _>(filter.end_date)
    .bind::<Nullable<Text>, _>(filter.region.as_deref())
    .bind::<Nullable<Text>, _>(filter.product.as_deref())
    .load::<SalesRow>(conn)?;

    Ok(rows.into_iter().map(|r| r.row).collect())
}

// --- Dashboard summary ---

#[derive(Debug, QueryableByName)]
struct Totals {
    #[diesel(sql_type = Double)]
    total_revenue: f64,
    #[diesel(sql_type = BigInt)]
    total_units: i64,
    #[diesel(sql_type = BigInt)]
    row_count: i64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct RegionRevenue {
    /// `None` groups rows with no region.
    #[diesel(sql_type = Nullable<Text>)]
    pub region: Option<String>,
    #[diesel(sql_type = Double)]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct MonthRevenue {
    /// `YYYY-MM`, `None` for undated rows.
    #[diesel(sql_type = Nullable<Text>)]
    pub month: Option<String>,
    #[diesel(sql_type = Double)]
    pub revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct SalesSummary {
    pub total_revenue: f64,
    pub total_units: i64,
    pub row_count: i64,
    pub avg_order_value: Option<f64>,
    pub revenue_by_region: Vec<RegionRevenue>,
    pub revenue_by_month: Vec<MonthRevenue>,
}

pub fn summary(conn: &mut PgConnection) -> Result<SalesSummary, Error> {
    let totals = diesel::sql_query(format!(
        "SELECT COALESCE(SUM(s.revenue), 0)::float8 AS total_revenue, \
         COALESCE(SUM(s.units), 0)::int8 AS total_units, \
         COUNT(*) AS row_count \
         FROM ({SALES_PROJECTION}) s"
    ))
    .get_result::<Totals>(conn)?;

    let revenue_by_region = diesel::sql_query(format!(
        "SELECT s.region::text AS region, COALESCE(SUM(s.revenue), 0)::float8 AS revenue \
         FROM ({SALES_PROJECTION}) s \
         GROUP BY s.region ORDER BY s.region ASC"
    ))
    .load::<RegionRevenue>(conn)?;

    let revenue_by_month = diesel::sql_query(format!(
        "SELECT to_char(date_trunc('month', s.date::timestamp), 'YYYY-MM') AS month, \
         COALESCE(SUM(s.revenue), 0)::float8 AS revenue \
         FROM ({SALES_PROJECTION}) s \
         GROUP BY 1 ORDER BY 1 ASC"
    ))
    .load::<MonthRevenue>(conn)?;

    Ok(SalesSummary {
        avg_order_value: average(totals.total_revenue, totals.row_count),
        total_revenue: totals.total_revenue,
        total_units: totals.total_units,
        row_count: totals.row_count,
        revenue_by_region,
        revenue_by_month,
    })
}

fn average(total: f64, count: i64) -> Option<f64> {
    (count > 0).then(|| total / count as f64)
}
