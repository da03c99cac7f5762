use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// A time range on a single day during which no test drives may be booked.
/// Bounds are inclusive as authored by staff. Rows are immutable; edits are
/// delete + recreate.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BlockedSlot {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub all_day: bool,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BlockedSlot {
    pub fn new(
        date: NaiveDate,
        start_time: String,
        end_time: String,
        all_day: bool,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            start_time,
            end_time,
            all_day,
            reason,
            created_at: Utc::now(),
        }
    }
}
