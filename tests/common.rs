use dealership_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_vehicle_repo::SqliteVehicleRepo,
        sqlite_customer_repo::SqliteCustomerRepo,
        sqlite_test_drive_repo::SqliteTestDriveRepo,
        sqlite_blocked_slot_repo::SqliteBlockedSlotRepo,
        sqlite_submission_repo::SqliteSubmissionRepo,
        sqlite_transaction_repo::SqliteTransactionRepo,
        sqlite_metrics_repo::SqliteMetricsRepo,
    },
    domain::ports::EmailService,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
}

/// Records every send; can be flipped into an outage to exercise the
/// flag-stays-false retry path.
pub struct RecordingEmailService {
    pub sent: Mutex<Vec<SentEmail>>,
    pub fail_sends: AtomicBool,
}

impl RecordingEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count_to(&self, recipient: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.recipient == recipient)
            .count()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        _html_body: &str,
        _attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>
    ) -> Result<(), AppError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(AppError::InternalWithMsg("Simulated mail outage".into()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
        });
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub emails: Arc<RecordingEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        // UTC here so "today"/"tomorrow" in reminder tests never straddle a
        // timezone boundary relative to the seeded dates.
        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            dealership_name: "Test Motors".to_string(),
            notify_email: "staff@test-motors.local".to_string(),
            cron_secret: "cron-secret-1".to_string(),
            timezone: chrono_tz::UTC,
            open_time: "09:00".to_string(),
            close_time: "19:00".to_string(),
            slot_minutes: 60,
            reminder_hour: 7,
        };

        let emails = Arc::new(RecordingEmailService::new());

        let state = Arc::new(AppState {
            config: config.clone(),
            vehicle_repo: Arc::new(SqliteVehicleRepo::new(pool.clone())),
            customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
            test_drive_repo: Arc::new(SqliteTestDriveRepo::new(pool.clone())),
            blocked_slot_repo: Arc::new(SqliteBlockedSlotRepo::new(pool.clone())),
            submission_repo: Arc::new(SqliteSubmissionRepo::new(pool.clone())),
            transaction_repo: Arc::new(SqliteTransactionRepo::new(pool.clone())),
            metrics_repo: Arc::new(SqliteMetricsRepo::new(pool.clone())),
            email_service: emails.clone(),
            templates: Arc::new(load_templates()),
        });

        // No background worker here: tests drive the reminder sweep directly
        // or through the cron endpoint.
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            emails,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
