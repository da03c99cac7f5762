use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::domain::models::customer::Customer;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.customer_repo.list().await?;
    Ok(Json(customers))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customer_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;
    Ok(Json(customer))
}

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }

    let customer = Customer::new(payload.name, payload.email, payload.phone, payload.notes);
    let created = state.customer_repo.create(&customer).await?;
    info!("Customer created: {}", created.id);
    Ok(Json(created))
}

pub async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut customer = state.customer_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Customer not found".into()))?;

    if let Some(val) = payload.name { customer.name = val; }
    if let Some(val) = payload.email { customer.email = val; }
    if let Some(val) = payload.phone { customer.phone = Some(val); }
    if let Some(val) = payload.notes { customer.notes = Some(val); }

    let updated = state.customer_repo.update(&customer).await?;
    info!("Customer updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.customer_repo.delete(&id).await?;
    info!("Customer deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
