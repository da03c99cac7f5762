use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const TRANSACTION_KINDS: &[&str] = &["SALE", "TRADE_IN"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Transaction {
    pub id: String,
    pub vehicle_id: String,
    pub customer_id: Option<String>,
    pub kind: String,
    pub amount_cents: i64,
    pub occurred_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        vehicle_id: String,
        customer_id: Option<String>,
        kind: String,
        amount_cents: i64,
        occurred_on: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id,
            customer_id,
            kind,
            amount_cents,
            occurred_on,
            notes,
            created_at: Utc::now(),
        }
    }
}
