use std::sync::Arc;
use crate::domain::ports::{
    VehicleRepository, CustomerRepository, TestDriveRepository,
    BlockedSlotRepository, SubmissionRepository, TransactionRepository,
    MetricsRepository, EmailService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vehicle_repo: Arc<dyn VehicleRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub test_drive_repo: Arc<dyn TestDriveRepository>,
    pub blocked_slot_repo: Arc<dyn BlockedSlotRepository>,
    pub submission_repo: Arc<dyn SubmissionRepository>,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub metrics_repo: Arc<dyn MetricsRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
