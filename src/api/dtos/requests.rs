use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateVehicleRequest {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_cents: i64,
    pub mileage: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateVehicleRequest {
    pub vin: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price_cents: Option<i64>,
    pub mileage: Option<i64>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// Public booking form. Date is "YYYY-MM-DD"; time accepts "14:00" or "2:00 PM".
#[derive(Deserialize)]
pub struct CreateTestDriveRequest {
    pub vehicle_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

/// Staff-side booking: may link a known customer and record the channel.
#[derive(Deserialize)]
pub struct AdminCreateTestDriveRequest {
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub source: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTestDriveRequest {
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelTestDriveRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBlockedSlotRequest {
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub all_day: Option<bool>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub vin: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: i64,
    pub condition: String,
    pub asking_price_cents: Option<i64>,
    pub kind: String,
}

#[derive(Deserialize)]
pub struct UpdateSubmissionRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTransactionRequest {
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub kind: String,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct RecomputeMetricsRequest {
    pub year: i32,
    pub month: u32,
}
