use crate::domain::models::test_drive::{ReminderPhase, TestDrive};
use crate::domain::ports::TestDriveRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

pub struct PostgresTestDriveRepo {
    pool: PgPool,
}

impl PostgresTestDriveRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TestDriveRepository for PostgresTestDriveRepo {
    async fn create(&self, test_drive: &TestDrive) -> Result<TestDrive, AppError> {
        sqlx::query_as::<_, TestDrive>(
            "INSERT INTO test_drives (id, vehicle_id, customer_id, customer_name, customer_email, customer_phone, date, time, status, source, notes, cancellation_reason, next_day_reminder_sent, day_of_reminder_sent, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING *"
        )
            .bind(&test_drive.id).bind(&test_drive.vehicle_id).bind(&test_drive.customer_id)
            .bind(&test_drive.customer_name).bind(&test_drive.customer_email).bind(&test_drive.customer_phone)
            .bind(test_drive.date).bind(&test_drive.time).bind(&test_drive.status).bind(&test_drive.source)
            .bind(&test_drive.notes).bind(&test_drive.cancellation_reason)
            .bind(test_drive.next_day_reminder_sent).bind(test_drive.day_of_reminder_sent)
            .bind(test_drive.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TestDrive>, AppError> {
        sqlx::query_as::<_, TestDrive>("SELECT * FROM test_drives WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<TestDrive>, AppError> {
        sqlx::query_as::<_, TestDrive>("SELECT * FROM test_drives ORDER BY date ASC, time ASC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TestDrive>, AppError> {
        sqlx::query_as::<_, TestDrive>(
            "SELECT * FROM test_drives WHERE date >= $1 AND date <= $2 ORDER BY date ASC, time ASC"
        )
            .bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_by_date(&self, date: NaiveDate) -> Result<Vec<TestDrive>, AppError> {
        sqlx::query_as::<_, TestDrive>(
            "SELECT * FROM test_drives WHERE date = $1 AND status != 'CANCELLED' ORDER BY time ASC"
        )
            .bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, test_drive: &TestDrive) -> Result<TestDrive, AppError> {
        sqlx::query_as::<_, TestDrive>(
            "UPDATE test_drives SET customer_name=$1, customer_email=$2, customer_phone=$3, date=$4, time=$5, status=$6, notes=$7, cancellation_reason=$8
             WHERE id=$9
             RETURNING *"
        )
            .bind(&test_drive.customer_name).bind(&test_drive.customer_email).bind(&test_drive.customer_phone)
            .bind(test_drive.date).bind(&test_drive.time).bind(&test_drive.status)
            .bind(&test_drive.notes).bind(&test_drive.cancellation_reason)
            .bind(&test_drive.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM test_drives WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Test drive not found".into()));
        }
        Ok(())
    }

    async fn find_reminder_due(&self, date: NaiveDate, phase: ReminderPhase) -> Result<Vec<TestDrive>, AppError> {
        let query = format!(
            "SELECT * FROM test_drives WHERE date = $1 AND status = 'CONFIRMED' AND {} = FALSE ORDER BY time ASC",
            phase.flag_column()
        );
        sqlx::query_as::<_, TestDrive>(&query)
            .bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_reminder_sent(&self, id: &str, phase: ReminderPhase) -> Result<bool, AppError> {
        let query = format!(
            "UPDATE test_drives SET {col} = TRUE WHERE id = $1 AND {col} = FALSE",
            col = phase.flag_column()
        );
        let result = sqlx::query(&query)
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(result.rows_affected() == 1)
    }

    async fn count_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM test_drives WHERE date >= $1 AND date < $2")
            .bind(start).bind(end)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
