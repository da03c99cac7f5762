use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBlockedSlotRequest;
use crate::domain::models::blocked_slot::BlockedSlot;
use crate::domain::services::availability::normalize_time;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;

pub async fn list_blocked_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;

    let slots = state.blocked_slot_repo.list_by_range(start, end).await?;
    Ok(Json(slots))
}

pub async fn create_blocked_slot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBlockedSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let all_day = payload.all_day.unwrap_or(false);

    let (start_time, end_time) = if all_day {
        (state.config.open_time.clone(), state.config.close_time.clone())
    } else {
        let start = payload.start_time
            .as_deref()
            .and_then(normalize_time)
            .ok_or_else(|| AppError::Validation("start_time required (HH:MM)".into()))?;
        let end = payload.end_time
            .as_deref()
            .and_then(normalize_time)
            .ok_or_else(|| AppError::Validation("end_time required (HH:MM)".into()))?;
        if start > end {
            return Err(AppError::Validation("start_time must not be after end_time".into()));
        }
        (start, end)
    };

    let slot = BlockedSlot::new(payload.date, start_time, end_time, all_day, payload.reason);
    let created = state.blocked_slot_repo.create(&slot).await?;
    info!("Blocked slot created: {} on {} ({}-{})", created.id, created.date, created.start_time, created.end_time);
    Ok(Json(created))
}

pub async fn delete_blocked_slot(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.blocked_slot_repo.delete(&id).await?;
    info!("Blocked slot deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
