use crate::domain::models::submission::VehicleSubmission;
use crate::domain::ports::SubmissionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

pub struct SqliteSubmissionRepo {
    pool: SqlitePool,
}

impl SqliteSubmissionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for SqliteSubmissionRepo {
    async fn create(&self, submission: &VehicleSubmission) -> Result<VehicleSubmission, AppError> {
        sqlx::query_as::<_, VehicleSubmission>(
            "INSERT INTO vehicle_submissions (id, customer_name, customer_email, customer_phone, vin, make, model, year, mileage, condition, asking_price_cents, kind, status, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&submission.id).bind(&submission.customer_name).bind(&submission.customer_email)
            .bind(&submission.customer_phone).bind(&submission.vin).bind(&submission.make)
            .bind(&submission.model).bind(submission.year).bind(submission.mileage)
            .bind(&submission.condition).bind(submission.asking_price_cents).bind(&submission.kind)
            .bind(&submission.status).bind(&submission.notes).bind(submission.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<VehicleSubmission>, AppError> {
        sqlx::query_as::<_, VehicleSubmission>("SELECT * FROM vehicle_submissions WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, status: Option<&str>) -> Result<Vec<VehicleSubmission>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, VehicleSubmission>(
                "SELECT * FROM vehicle_submissions WHERE status = ? ORDER BY created_at DESC"
            )
                .bind(status)
                .fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, VehicleSubmission>(
                "SELECT * FROM vehicle_submissions ORDER BY created_at DESC"
            )
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn update(&self, submission: &VehicleSubmission) -> Result<VehicleSubmission, AppError> {
        sqlx::query_as::<_, VehicleSubmission>(
            "UPDATE vehicle_submissions SET status=?, notes=? WHERE id=? RETURNING *"
        )
            .bind(&submission.status).bind(&submission.notes).bind(&submission.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicle_submissions WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Submission not found".into()));
        }
        Ok(())
    }

    async fn count_created_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count FROM vehicle_submissions WHERE created_at >= ? AND created_at < ?"
        )
            .bind(start).bind(end)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
