use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::domain::models::submission::{
    NewSubmissionParams, VehicleSubmission, SUBMISSION_KINDS, SUBMISSION_STATUSES,
};
use crate::domain::services::notifications;
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !SUBMISSION_KINDS.contains(&payload.kind.as_str()) {
        return Err(AppError::Validation("Invalid kind (SELL or TRADE_IN)".into()));
    }

    let submission = VehicleSubmission::new(NewSubmissionParams {
        customer_name: payload.name,
        customer_email: payload.email,
        customer_phone: payload.phone,
        vin: payload.vin,
        make: payload.make,
        model: payload.model,
        year: payload.year,
        mileage: payload.mileage,
        condition: payload.condition,
        asking_price_cents: payload.asking_price_cents,
        kind: payload.kind,
    });

    let created = state.submission_repo.create(&submission).await?;
    info!("Submission received: {} ({})", created.id, created.kind);

    let notify_state = state.clone();
    let notify_submission = created.clone();
    tokio::spawn(async move {
        notifications::send_submission_alert(&notify_state, &notify_submission).await;
    });

    Ok(Json(created))
}

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let status = params.get("status").map(String::as_str);
    if let Some(status) = status {
        if !SUBMISSION_STATUSES.contains(&status) {
            return Err(AppError::Validation("Invalid status filter".into()));
        }
    }
    let submissions = state.submission_repo.list(status).await?;
    Ok(Json(submissions))
}

pub async fn get_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let submission = state.submission_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Submission not found".into()))?;
    Ok(Json(submission))
}

pub async fn update_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut submission = state.submission_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Submission not found".into()))?;

    if let Some(status) = payload.status {
        if !SUBMISSION_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation("Invalid status".into()));
        }
        submission.status = status;
    }
    if let Some(notes) = payload.notes {
        submission.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    let updated = state.submission_repo.update(&submission).await?;
    info!("Submission updated: {} -> {}", updated.id, updated.status);
    Ok(Json(updated))
}

pub async fn delete_submission(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.submission_repo.delete(&id).await?;
    info!("Submission deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
