use crate::domain::models::metric::MonthlyMetric;
use crate::domain::ports::MetricsRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresMetricsRepo {
    pool: PgPool,
}

impl PostgresMetricsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PostgresMetricsRepo {
    async fn upsert(&self, metric: &MonthlyMetric) -> Result<MonthlyMetric, AppError> {
        sqlx::query_as::<_, MonthlyMetric>(
            "INSERT INTO monthly_metrics (month, vehicles_sold, gross_revenue_cents, avg_sale_price_cents, test_drives_booked, submissions_received, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT(month) DO UPDATE SET
                vehicles_sold = excluded.vehicles_sold,
                gross_revenue_cents = excluded.gross_revenue_cents,
                avg_sale_price_cents = excluded.avg_sale_price_cents,
                test_drives_booked = excluded.test_drives_booked,
                submissions_received = excluded.submissions_received,
                updated_at = excluded.updated_at
             RETURNING *"
        )
            .bind(metric.month).bind(metric.vehicles_sold).bind(metric.gross_revenue_cents)
            .bind(metric.avg_sale_price_cents).bind(metric.test_drives_booked)
            .bind(metric.submissions_received).bind(metric.updated_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_month(&self, month: NaiveDate) -> Result<Option<MonthlyMetric>, AppError> {
        sqlx::query_as::<_, MonthlyMetric>("SELECT * FROM monthly_metrics WHERE month = $1")
            .bind(month).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<MonthlyMetric>, AppError> {
        sqlx::query_as::<_, MonthlyMetric>(
            "SELECT * FROM monthly_metrics ORDER BY month DESC LIMIT $1"
        )
            .bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
