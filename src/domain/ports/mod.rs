use crate::domain::models::{
    vehicle::Vehicle, customer::Customer, test_drive::{TestDrive, ReminderPhase},
    blocked_slot::BlockedSlot, submission::VehicleSubmission,
    transaction::Transaction, metric::MonthlyMetric,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, AppError>;
    async fn list(&self, status: Option<&str>) -> Result<Vec<Vehicle>, AppError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn update_status(&self, id: &str, status: &str) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError>;
    async fn list(&self) -> Result<Vec<Customer>, AppError>;
    async fn update(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TestDriveRepository: Send + Sync {
    async fn create(&self, test_drive: &TestDrive) -> Result<TestDrive, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TestDrive>, AppError>;
    async fn list(&self) -> Result<Vec<TestDrive>, AppError>;
    async fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<TestDrive>, AppError>;
    /// Non-cancelled appointments on the given day, used by the availability check.
    async fn list_active_by_date(&self, date: NaiveDate) -> Result<Vec<TestDrive>, AppError>;
    async fn update(&self, test_drive: &TestDrive) -> Result<TestDrive, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// CONFIRMED appointments on `date` whose flag for `phase` is still unset.
    async fn find_reminder_due(&self, date: NaiveDate, phase: ReminderPhase) -> Result<Vec<TestDrive>, AppError>;
    /// Compare-and-set: flips the phase flag only if it is currently false.
    /// Returns false when a concurrent sweep already recorded the send.
    async fn mark_reminder_sent(&self, id: &str, phase: ReminderPhase) -> Result<bool, AppError>;
    async fn count_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<i64, AppError>;
}

#[async_trait]
pub trait BlockedSlotRepository: Send + Sync {
    async fn create(&self, slot: &BlockedSlot) -> Result<BlockedSlot, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<BlockedSlot>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<BlockedSlot>, AppError>;
    async fn list_by_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<BlockedSlot>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &VehicleSubmission) -> Result<VehicleSubmission, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<VehicleSubmission>, AppError>;
    async fn list(&self, status: Option<&str>) -> Result<Vec<VehicleSubmission>, AppError>;
    async fn update(&self, submission: &VehicleSubmission) -> Result<VehicleSubmission, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_created_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, AppError>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create(&self, transaction: &Transaction) -> Result<Transaction, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, AppError>;
    async fn list(&self) -> Result<Vec<Transaction>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// (count, summed amount) of SALE transactions dated within [start, end).
    async fn summarize_sales(&self, start: NaiveDate, end: NaiveDate) -> Result<(i64, i64), AppError>;
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    async fn upsert(&self, metric: &MonthlyMetric) -> Result<MonthlyMetric, AppError>;
    async fn find_by_month(&self, month: NaiveDate) -> Result<Option<MonthlyMetric>, AppError>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<MonthlyMetric>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str, attachment_name: Option<&str>, attachment_data: Option<&[u8]>) -> Result<(), AppError>;
}
