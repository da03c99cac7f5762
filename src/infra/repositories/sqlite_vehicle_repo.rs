use crate::domain::models::vehicle::Vehicle;
use crate::domain::ports::VehicleRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteVehicleRepo {
    pool: SqlitePool,
}

impl SqliteVehicleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for SqliteVehicleRepo {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (id, vin, make, model, year, price_cents, mileage, status, description, image_url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&vehicle.id).bind(&vehicle.vin).bind(&vehicle.make).bind(&vehicle.model)
            .bind(vehicle.year).bind(vehicle.price_cents).bind(vehicle.mileage).bind(&vehicle.status)
            .bind(&vehicle.description).bind(&vehicle.image_url).bind(vehicle.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, AppError> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, status: Option<&str>) -> Result<Vec<Vehicle>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, Vehicle>(
                "SELECT * FROM vehicles WHERE status = ? ORDER BY created_at DESC"
            )
                .bind(status)
                .fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET vin=?, make=?, model=?, year=?, price_cents=?, mileage=?, status=?, description=?, image_url=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&vehicle.vin).bind(&vehicle.make).bind(&vehicle.model).bind(vehicle.year)
            .bind(vehicle.price_cents).bind(vehicle.mileage).bind(&vehicle.status)
            .bind(&vehicle.description).bind(&vehicle.image_url)
            .bind(&vehicle.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(&self, id: &str, status: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE vehicles SET status = ? WHERE id = ?")
            .bind(status).bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".into()));
        }
        Ok(())
    }
}
