use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error;

use crate::models::{AnalyticsMetric, NewAnalyticsMetric};
use crate::schema::analytics_metrics;

pub fn record_metric(
    conn: &mut PgConnection,
    metric: &NewAnalyticsMetric,
) -> Result<AnalyticsMetric, Error> {
    diesel::insert_into(analytics_metrics::table)
        .values(metric)
        .returning(AnalyticsMetric::as_returning())
        .get_result(conn)
}

/// Observations of one metric, oldest first.
pub fn metrics_by_name(conn: &mut PgConnection, name: &str) -> Result<Vec<AnalyticsMetric>, Error> {
    analytics_metrics::table
        .filter(analytics_metrics::metric_name.eq(name))
        .order((analytics_metrics::date.asc(), analytics_metrics::id.asc()))
        .select(AnalyticsMetric::as_select())
        .load(conn)
}
