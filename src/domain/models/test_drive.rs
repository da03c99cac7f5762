use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const TEST_DRIVE_STATUSES: &[&str] = &["PENDING", "CONFIRMED", "CANCELLED"];
pub const TEST_DRIVE_SOURCES: &[&str] = &["WEB", "PHONE", "SHOWROOM"];

/// The two independent reminder passes. Each maps to its own sent-flag column
/// so the sweeps never interfere with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPhase {
    DayOf,
    NextDay,
}

impl ReminderPhase {
    pub fn flag_column(&self) -> &'static str {
        match self {
            ReminderPhase::DayOf => "day_of_reminder_sent",
            ReminderPhase::NextDay => "next_day_reminder_sent",
        }
    }
}

/// A scheduled test-drive appointment. The customer_* fields are a snapshot
/// taken at booking time and are never reconciled against the customers table.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TestDrive {
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub date: NaiveDate,
    /// Normalized 24-hour slot label, e.g. "14:00".
    pub time: String,
    pub status: String,
    pub source: String,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub next_day_reminder_sent: bool,
    pub day_of_reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewTestDriveParams {
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub source: String,
    pub status: String,
    pub notes: Option<String>,
}

impl TestDrive {
    pub fn new(params: NewTestDriveParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id: params.vehicle_id,
            customer_id: params.customer_id,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            date: params.date,
            time: params.time,
            status: params.status,
            source: params.source,
            notes: params.notes,
            cancellation_reason: None,
            next_day_reminder_sent: false,
            day_of_reminder_sent: false,
            created_at: Utc::now(),
        }
    }
}
