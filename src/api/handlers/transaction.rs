use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateTransactionRequest;
use crate::domain::models::transaction::{Transaction, TRANSACTION_KINDS};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !TRANSACTION_KINDS.contains(&payload.kind.as_str()) {
        return Err(AppError::Validation("Invalid kind (SALE or TRADE_IN)".into()));
    }
    if payload.amount_cents < 0 {
        return Err(AppError::Validation("Amount must not be negative".into()));
    }

    let vehicle = state.vehicle_repo.find_by_id(&payload.vehicle_id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    if let Some(customer_id) = &payload.customer_id {
        state.customer_repo.find_by_id(customer_id).await?
            .ok_or(AppError::NotFound("Customer not found".into()))?;
    }

    let transaction = Transaction::new(
        payload.vehicle_id,
        payload.customer_id,
        payload.kind,
        payload.amount_cents,
        payload.occurred_on,
        payload.notes,
    );

    let created = state.transaction_repo.create(&transaction).await?;

    if created.kind == "SALE" {
        state.vehicle_repo.update_status(&vehicle.id, "SOLD").await?;
    }

    info!("Transaction recorded: {} ({} for vehicle {})", created.id, created.kind, created.vehicle_id);
    Ok(Json(created))
}

pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = state.transaction_repo.list().await?;
    Ok(Json(transactions))
}

pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = state.transaction_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Transaction not found".into()))?;
    Ok(Json(transaction))
}

pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.transaction_repo.delete(&id).await?;
    info!("Transaction deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
