use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{
    analytics_metrics, data_uploads, dim_customer, dim_date, dim_product, dim_region, fact_sales,
    queries, users,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

// --- Users ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub company: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub company: String,
    pub hashed_password: String,
}

// --- Data Uploads ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completed and failed uploads carry a `processed_at` timestamp.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownVariant { kind: "upload status", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = data_uploads)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DataUpload {
    pub id: i32,
    pub user_id: i32,
    pub file_name: String,
    pub file_size: i32,
    #[serde(rename = "rows")]
    pub row_count: i32,
    #[serde(rename = "columns")]
    pub column_names: serde_json::Value,
    pub status: String,
    pub uploaded_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl DataUpload {
    pub fn status(&self) -> Result<UploadStatus, UnknownVariant> {
        self.status.parse()
    }
}

/// Status and timestamps are left to the column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = data_uploads)]
pub struct NewDataUpload {
    pub user_id: i32,
    pub file_name: String,
    pub file_size: i32,
    pub row_count: i32,
    pub column_names: serde_json::Value,
}

// --- Query History ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Analytics,
    AiAssistant,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::AiAssistant => "ai_assistant",
        }
    }
}

impl FromStr for QueryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analytics" => Ok(Self::Analytics),
            "ai_assistant" => Ok(Self::AiAssistant),
            other => Err(UnknownVariant { kind: "query type", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = queries)]
#[diesel(belongs_to(User))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QueryRecord {
    pub id: i32,
    pub user_id: i32,
    pub query_type: String,
    pub query_text: String,
    pub filters: Option<serde_json::Value>,
    pub results: Option<serde_json::Value>,
    pub execution_time_ms: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = queries)]
pub struct NewQueryRecord {
    pub user_id: i32,
    pub query_type: String,
    pub query_text: String,
    pub filters: Option<serde_json::Value>,
    pub results: Option<serde_json::Value>,
    pub execution_time_ms: Option<f64>,
}

impl NewQueryRecord {
    pub fn new(user_id: i32, query_type: QueryType, query_text: impl Into<String>) -> Self {
        Self {
            user_id,
            query_type: query_type.as_str().to_string(),
            query_text: query_text.into(),
            filters: None,
            results: None,
            execution_time_ms: None,
        }
    }
}

// --- Analytics Metrics ---

#[derive(Debug, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = analytics_metrics)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AnalyticsMetric {
    pub id: i32,
    pub metric_name: String,
    pub metric_value: f64,
    pub metric_type: String,
    pub date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = analytics_metrics)]
pub struct NewAnalyticsMetric {
    pub metric_name: String,
    pub metric_value: f64,
    pub metric_type: String,
    pub date: DateTime<Utc>,
    pub metadata: Option<serde_json::Value>,
}

// --- Star Schema: Dimensions ---

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Serialize)]
#[diesel(table_name = dim_date)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DimDate {
    pub date_key: i32,
    pub full_date: NaiveDate,
    pub day: i32,
    pub month: i32,
    pub year: i32,
    pub quarter: i32,
    pub day_name: String,
    pub month_name: String,
}

impl DimDate {
    /// Calendar row for `date`, keyed as `YYYYMMDD`.
    pub fn from_date(date: NaiveDate) -> Self {
        let (year, month, day) = (date.year(), date.month() as i32, date.day() as i32);
        Self {
            date_key: year * 10_000 + month * 100 + day,
            full_date: date,
            day,
            month,
            year,
            quarter: (month - 1) / 3 + 1,
            day_name: date.format("%A").to_string(),
            month_name: date.format("%B").to_string(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = dim_product)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DimProduct {
    pub product_key: i32,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub unit_cost: f64,
    pub is_active: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dim_product)]
pub struct NewDimProduct {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = dim_region)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DimRegion {
    pub region_key: i32,
    pub region_id: String,
    pub region_name: String,
    pub country: String,
    pub continent: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dim_region)]
pub struct NewDimRegion {
    pub region_id: String,
    pub region_name: String,
    pub country: String,
    pub continent: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = dim_customer)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DimCustomer {
    pub customer_key: i32,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_segment: String,
    pub customer_type: String,
    pub is_active: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = dim_customer)]
pub struct NewDimCustomer {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_segment: String,
    pub customer_type: String,
}

// --- Star Schema: Fact ---

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = fact_sales)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FactSale {
    pub id: i32,
    pub date_key: i32,
    pub product_key: i32,
    pub region_key: i32,
    pub customer_key: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub discount: f64,
    pub created_at: DateTime<Utc>,
}

/// `discount: None` inserts the column default (0.0).
#[derive(Debug, Insertable)]
#[diesel(table_name = fact_sales)]
pub struct NewFactSale {
    pub date_key: i32,
    pub product_key: i32,
    pub region_key: i32,
    pub customer_key: i32,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub discount: Option<f64>,
}

/// A fact row resolved against all four of its dimensions.
#[derive(Debug, Serialize)]
pub struct SaleDetail {
    pub sale: FactSale,
    pub date: DimDate,
    pub product: DimProduct,
    pub region: DimRegion,
    pub customer: DimCustomer,
}

impl From<(FactSale, DimDate, DimProduct, DimRegion, DimCustomer)> for SaleDetail {
    fn from((sale, date, product, region, customer): (FactSale, DimDate, DimProduct, DimRegion, DimCustomer)) -> Self {
        Self { sale, date, product, region, customer }
    }
}
