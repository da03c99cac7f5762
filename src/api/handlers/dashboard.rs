use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::RecomputeMetricsRequest;
use crate::domain::services::metrics;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;

/// Refreshes the current month and returns the most recent rows. History rows
/// keep whatever was last computed for them.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let months: i64 = params
        .get("months")
        .map(|m| m.parse().map_err(|_| AppError::Validation("Invalid months".into())))
        .transpose()?
        .unwrap_or(6);

    metrics::recompute_current_month(&state).await?;

    let history = state.metrics_repo.list_recent(months).await?;
    Ok(Json(history))
}

pub async fn recompute_metrics(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecomputeMetricsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let metric = metrics::recompute_month(&state, payload.year, payload.month).await?;
    Ok(Json(metric))
}
