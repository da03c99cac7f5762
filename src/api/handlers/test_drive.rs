use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{
    AdminCreateTestDriveRequest, CancelTestDriveRequest, CreateTestDriveRequest,
    UpdateTestDriveRequest,
};
use crate::api::dtos::responses::SlotsResponse;
use crate::domain::models::test_drive::{
    NewTestDriveParams, TestDrive, TEST_DRIVE_SOURCES, TEST_DRIVE_STATUSES,
};
use crate::domain::services::availability::{
    business_hour_slots, check_slot, normalize_time, SlotConflict,
};
use crate::domain::services::notifications;
use crate::error::{is_unique_violation, AppError};
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};

struct BookingInput {
    vehicle_id: String,
    customer_id: Option<String>,
    name: String,
    email: String,
    phone: Option<String>,
    date: String,
    time: String,
    source: String,
    status: String,
    notes: Option<String>,
}

/// Shared booking path for the public form and the staff calendar. Validates
/// the vehicle and the slot, inserts, and kicks off the confirmation email
/// without blocking the response.
async fn book_slot(state: &Arc<AppState>, input: BookingInput) -> Result<TestDrive, AppError> {
    let date = NaiveDate::parse_from_str(&input.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    let time = normalize_time(&input.time)
        .ok_or_else(|| AppError::Validation("Invalid time format (HH:MM or H:MM AM/PM)".into()))?;

    let vehicle = state.vehicle_repo.find_by_id(&input.vehicle_id).await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;
    if vehicle.status == "SOLD" {
        return Err(AppError::Validation("Vehicle is no longer available for test drives".into()));
    }

    if let Some(customer_id) = &input.customer_id {
        state.customer_repo.find_by_id(customer_id).await?
            .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;
    }

    let slots = business_hour_slots(
        &state.config.open_time,
        &state.config.close_time,
        state.config.slot_minutes,
    );
    if !slots.contains(&time) {
        return Err(AppError::Validation("Requested time is outside business hours".into()));
    }

    let slot_time = NaiveTime::parse_from_str(&time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time".into()))?;
    let now_local = Utc::now().with_timezone(&state.config.timezone).naive_local();
    if date.and_time(slot_time) <= now_local {
        return Err(AppError::Validation("Cannot book in the past".into()));
    }

    let blocked = state.blocked_slot_repo.list_by_date(date).await?;
    let existing = state.test_drive_repo.list_active_by_date(date).await?;
    if let Some(conflict) = check_slot(&time, &blocked, &existing) {
        warn!("Booking rejected for {} {}: {}", date, time, conflict);
        return Err(AppError::SlotUnavailable(conflict));
    }

    let test_drive = TestDrive::new(NewTestDriveParams {
        vehicle_id: input.vehicle_id,
        customer_id: input.customer_id,
        customer_name: input.name,
        customer_email: input.email,
        customer_phone: input.phone,
        date,
        time,
        source: input.source,
        status: input.status,
        notes: input.notes,
    });

    let created = match state.test_drive_repo.create(&test_drive).await {
        Ok(created) => created,
        // Two racing bookings both pass the read-side check; the partial
        // unique index picks the winner and the loser lands here.
        Err(AppError::Database(e)) if is_unique_violation(&e) => {
            return Err(AppError::SlotUnavailable(SlotConflict::Booked));
        }
        Err(e) => return Err(e),
    };

    info!("Test drive booked: {} for vehicle {} on {} at {}", created.id, vehicle.id, created.date, created.time);

    let notify_state = state.clone();
    let notify_td = created.clone();
    tokio::spawn(async move {
        if let Err(e) = notifications::send_booking_confirmation(&notify_state, &notify_td, &vehicle).await {
            warn!("Booking confirmation email failed for {}: {}", notify_td.id, e);
        }
    });

    Ok(created)
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;

    let blocked = state.blocked_slot_repo.list_by_date(date).await?;
    let existing = state.test_drive_repo.list_active_by_date(date).await?;

    let slots: Vec<String> = business_hour_slots(
        &state.config.open_time,
        &state.config.close_time,
        state.config.slot_minutes,
    )
    .into_iter()
    .filter(|slot| check_slot(slot, &blocked, &existing).is_none())
    .collect();

    Ok(Json(SlotsResponse {
        date: date_str.clone(),
        slots,
    }))
}

pub async fn create_test_drive(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTestDriveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = book_slot(&state, BookingInput {
        vehicle_id: payload.vehicle_id,
        customer_id: None,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        date: payload.date,
        time: payload.time,
        source: "WEB".to_string(),
        status: "PENDING".to_string(),
        notes: payload.notes,
    }).await?;

    Ok(Json(created))
}

pub async fn admin_create_test_drive(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AdminCreateTestDriveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let source = payload.source.unwrap_or_else(|| "PHONE".to_string());
    if !TEST_DRIVE_SOURCES.contains(&source.as_str()) {
        return Err(AppError::Validation("Invalid source".into()));
    }

    let created = book_slot(&state, BookingInput {
        vehicle_id: payload.vehicle_id,
        customer_id: payload.customer_id,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        date: payload.date,
        time: payload.time,
        source,
        status: "CONFIRMED".to_string(),
        notes: payload.notes,
    }).await?;

    Ok(Json(created))
}

pub async fn list_test_drives(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let test_drives = match (params.get("from"), params.get("to")) {
        (Some(from), Some(to)) => {
            let start = NaiveDate::parse_from_str(from, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid from date".into()))?;
            let end = NaiveDate::parse_from_str(to, "%Y-%m-%d")
                .map_err(|_| AppError::Validation("Invalid to date".into()))?;
            state.test_drive_repo.list_by_date_range(start, end).await?
        }
        _ => state.test_drive_repo.list().await?,
    };
    Ok(Json(test_drives))
}

pub async fn get_test_drive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let test_drive = state.test_drive_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Test drive not found".into()))?;
    Ok(Json(test_drive))
}

/// Staff edits do not re-run the availability check: moving an appointment
/// into blocked-off time is a deliberate staff action. Double-booking is
/// still impossible; the active-slot unique index rejects it.
pub async fn update_test_drive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTestDriveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut test_drive = state.test_drive_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Test drive not found".into()))?;

    if let Some(date_str) = payload.date {
        test_drive.date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))?;
    }
    if let Some(time_str) = payload.time {
        test_drive.time = normalize_time(&time_str)
            .ok_or_else(|| AppError::Validation("Invalid time format (HH:MM or H:MM AM/PM)".into()))?;
    }
    if let Some(status) = payload.status {
        if !TEST_DRIVE_STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation("Invalid status".into()));
        }
        if status == "CANCELLED" {
            if let Some(reason) = payload.cancellation_reason {
                test_drive.cancellation_reason = Some(reason);
            }
        }
        test_drive.status = status;
    }
    if let Some(notes) = payload.notes {
        test_drive.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    let updated = match state.test_drive_repo.update(&test_drive).await {
        Ok(updated) => updated,
        Err(AppError::Database(e)) if is_unique_violation(&e) => {
            return Err(AppError::SlotUnavailable(SlotConflict::Booked));
        }
        Err(e) => return Err(e),
    };

    info!("Test drive updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn cancel_test_drive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<CancelTestDriveRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut test_drive = state.test_drive_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Test drive not found".into()))?;

    if test_drive.status == "CANCELLED" {
        return Ok(Json(test_drive));
    }

    test_drive.status = "CANCELLED".to_string();
    if payload.reason.is_some() {
        test_drive.cancellation_reason = payload.reason;
    }

    let cancelled = state.test_drive_repo.update(&test_drive).await?;
    info!("Test drive cancelled: {}", cancelled.id);
    Ok(Json(cancelled))
}

pub async fn delete_test_drive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.test_drive_repo.delete(&id).await?;
    info!("Test drive deleted: {}", id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
