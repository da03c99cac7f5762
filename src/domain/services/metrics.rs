use std::sync::Arc;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use tracing::info;

use crate::domain::models::metric::MonthlyMetric;
use crate::error::AppError;
use crate::state::AppState;

/// Recomputes the dashboard row for one calendar month from the source tables
/// and upserts it. Never increments; running it twice is a no-op.
pub async fn recompute_month(
    state: &Arc<AppState>,
    year: i32,
    month: u32,
) -> Result<MonthlyMetric, AppError> {
    let month_start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::Validation("Invalid year/month".into()))?;
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| AppError::Validation("Invalid year/month".into()))?;

    let (vehicles_sold, gross_revenue_cents) = state
        .transaction_repo
        .summarize_sales(month_start, next_month_start)
        .await?;

    let test_drives_booked = state
        .test_drive_repo
        .count_in_range(month_start, next_month_start)
        .await?;

    let tz = state.config.timezone;
    let range_start_utc = tz
        .from_local_datetime(&month_start.and_hms_opt(0, 0, 0).unwrap())
        .earliest()
        .ok_or(AppError::Internal)?
        .with_timezone(&Utc);
    let range_end_utc = tz
        .from_local_datetime(&next_month_start.and_hms_opt(0, 0, 0).unwrap())
        .earliest()
        .ok_or(AppError::Internal)?
        .with_timezone(&Utc);

    let submissions_received = state
        .submission_repo
        .count_created_in_range(range_start_utc, range_end_utc)
        .await?;

    let metric = MonthlyMetric {
        month: month_start,
        vehicles_sold,
        gross_revenue_cents,
        avg_sale_price_cents: if vehicles_sold > 0 {
            gross_revenue_cents / vehicles_sold
        } else {
            0
        },
        test_drives_booked,
        submissions_received,
        updated_at: Utc::now(),
    };

    let saved = state.metrics_repo.upsert(&metric).await?;
    info!(
        "Recomputed metrics for {}: {} sold, {} test drives",
        month_start.format("%Y-%m"),
        saved.vehicles_sold,
        saved.test_drives_booked
    );
    Ok(saved)
}

/// Recompute for the month containing "now" in the deployment timezone.
pub async fn recompute_current_month(state: &Arc<AppState>) -> Result<MonthlyMetric, AppError> {
    let today = Utc::now().with_timezone(&state.config.timezone).date_naive();
    recompute_month(state, today.year(), today.month()).await
}
