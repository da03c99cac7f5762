use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::domain::models::vehicle::{NewVehicleParams, Vehicle, VEHICLE_STATUSES};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let status = params.get("status").map(String::as_str);
    if let Some(status) = status {
        if !VEHICLE_STATUSES.contains(&status) {
            return Err(AppError::Validation("Invalid status filter".into()));
        }
    }
    let vehicles = state.vehicle_repo.list(status).await?;
    Ok(Json(vehicles))
}

pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = state.vehicle_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;
    Ok(Json(vehicle))
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.vin.trim().is_empty() {
        return Err(AppError::Validation("VIN is required".into()));
    }

    let vehicle = Vehicle::new(NewVehicleParams {
        vin: payload.vin,
        make: payload.make,
        model: payload.model,
        year: payload.year,
        price_cents: payload.price_cents,
        mileage: payload.mileage,
        description: payload.description,
        image_url: payload.image_url,
    });

    let created = state.vehicle_repo.create(&vehicle).await?;
    info!("Vehicle created: {} ({})", created.id, created.vin);
    Ok(Json(created))
}

pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut vehicle = state.vehicle_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Vehicle not found".into()))?;

    if let Some(val) = payload.vin { vehicle.vin = val; }
    if let Some(val) = payload.make { vehicle.make = val; }
    if let Some(val) = payload.model { vehicle.model = val; }
    if let Some(val) = payload.year { vehicle.year = val; }
    if let Some(val) = payload.price_cents { vehicle.price_cents = val; }
    if let Some(val) = payload.mileage { vehicle.mileage = val; }
    if let Some(val) = payload.status {
        if !VEHICLE_STATUSES.contains(&val.as_str()) {
            return Err(AppError::Validation("Invalid status".into()));
        }
        vehicle.status = val;
    }
    if let Some(val) = payload.description { vehicle.description = Some(val); }
    if let Some(val) = payload.image_url { vehicle.image_url = Some(val); }

    let updated = state.vehicle_repo.update(&vehicle).await?;
    info!("Vehicle updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.vehicle_repo.delete(&id).await?;
    info!("Vehicle deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
