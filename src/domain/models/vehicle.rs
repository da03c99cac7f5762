use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const VEHICLE_STATUSES: &[&str] = &["AVAILABLE", "RESERVED", "SOLD"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_cents: i64,
    pub mileage: i64,
    pub status: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewVehicleParams {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price_cents: i64,
    pub mileage: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Vehicle {
    pub fn new(params: NewVehicleParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vin: params.vin,
            make: params.make,
            model: params.model,
            year: params.year,
            price_cents: params.price_cents,
            mileage: params.mileage,
            status: "AVAILABLE".to_string(),
            description: params.description,
            image_url: params.image_url,
            created_at: Utc::now(),
        }
    }

    /// Display label used in emails and calendar invites, e.g. "2022 Toyota Camry".
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}
