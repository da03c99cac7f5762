use crate::domain::models::transaction::Transaction;
use crate::domain::ports::TransactionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

pub struct PostgresTransactionRepo {
    pool: PgPool,
}

impl PostgresTransactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepo {
    async fn create(&self, transaction: &Transaction) -> Result<Transaction, AppError> {
        sqlx::query_as::<_, Transaction>(
            "INSERT INTO transactions (id, vehicle_id, customer_id, kind, amount_cents, occurred_on, notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *"
        )
            .bind(&transaction.id).bind(&transaction.vehicle_id).bind(&transaction.customer_id)
            .bind(&transaction.kind).bind(transaction.amount_cents).bind(transaction.occurred_on)
            .bind(&transaction.notes).bind(transaction.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, AppError> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Transaction>, AppError> {
        sqlx::query_as::<_, Transaction>("SELECT * FROM transactions ORDER BY occurred_on DESC")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transaction not found".into()));
        }
        Ok(())
    }

    async fn summarize_sales(&self, start: NaiveDate, end: NaiveDate) -> Result<(i64, i64), AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as count, COALESCE(SUM(amount_cents), 0)::BIGINT as total
             FROM transactions
             WHERE kind = 'SALE' AND occurred_on >= $1 AND occurred_on < $2"
        )
            .bind(start).bind(end)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok((row.get::<i64, _>("count"), row.get::<i64, _>("total")))
    }
}
