use crate::domain::models::blocked_slot::BlockedSlot;
use crate::domain::ports::BlockedSlotRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteBlockedSlotRepo {
    pool: SqlitePool,
}

impl SqliteBlockedSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlockedSlotRepository for SqliteBlockedSlotRepo {
    async fn create(&self, slot: &BlockedSlot) -> Result<BlockedSlot, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "INSERT INTO blocked_slots (id, date, start_time, end_time, all_day, reason, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&slot.id).bind(slot.date).bind(&slot.start_time).bind(&slot.end_time)
            .bind(slot.all_day).bind(&slot.reason).bind(slot.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>("SELECT * FROM blocked_slots WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE date = ? ORDER BY start_time ASC"
        )
            .bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<BlockedSlot>, AppError> {
        sqlx::query_as::<_, BlockedSlot>(
            "SELECT * FROM blocked_slots WHERE date >= ? AND date <= ? ORDER BY date ASC, start_time ASC"
        )
            .bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blocked_slots WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blocked slot not found".into()));
        }
        Ok(())
    }
}
