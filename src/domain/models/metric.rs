use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// One row per calendar month, keyed by the first day of the month.
/// Always recomputed from the source tables and upserted, never incremented.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MonthlyMetric {
    pub month: NaiveDate,
    pub vehicles_sold: i64,
    pub gross_revenue_cents: i64,
    pub avg_sale_price_cents: i64,
    pub test_drives_booked: i64,
    pub submissions_received: i64,
    pub updated_at: DateTime<Utc>,
}
