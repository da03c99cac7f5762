use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const SUBMISSION_KINDS: &[&str] = &["SELL", "TRADE_IN"];
pub const SUBMISSION_STATUSES: &[&str] = &["NEW", "REVIEWED", "OFFER_MADE", "CLOSED"];

/// A sell-your-car / trade-in intake form submitted from the public site.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct VehicleSubmission {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub condition: String,
    pub asking_price_cents: Option<i64>,
    pub kind: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewSubmissionParams {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub condition: String,
    pub asking_price_cents: Option<i64>,
    pub kind: String,
}

impl VehicleSubmission {
    pub fn new(params: NewSubmissionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            vin: params.vin,
            make: params.make,
            model: params.model,
            year: params.year,
            mileage: params.mileage,
            condition: params.condition,
            asking_price_cents: params.asking_price_cents,
            kind: params.kind,
            status: "NEW".to_string(),
            notes: None,
            created_at: Utc::now(),
        }
    }
}
