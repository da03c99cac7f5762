use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_vehicle_repo::PostgresVehicleRepo, postgres_customer_repo::PostgresCustomerRepo,
    postgres_test_drive_repo::PostgresTestDriveRepo, postgres_blocked_slot_repo::PostgresBlockedSlotRepo,
    postgres_submission_repo::PostgresSubmissionRepo, postgres_transaction_repo::PostgresTransactionRepo,
    postgres_metrics_repo::PostgresMetricsRepo,
    sqlite_vehicle_repo::SqliteVehicleRepo, sqlite_customer_repo::SqliteCustomerRepo,
    sqlite_test_drive_repo::SqliteTestDriveRepo, sqlite_blocked_slot_repo::SqliteBlockedSlotRepo,
    sqlite_submission_repo::SqliteSubmissionRepo, sqlite_transaction_repo::SqliteTransactionRepo,
    sqlite_metrics_repo::SqliteMetricsRepo,
};

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("confirmation.html", include_str!("../templates/confirmation.html"))
        .expect("Failed to load confirmation template");
    tera.add_raw_template("reminder_day_of.html", include_str!("../templates/reminder_day_of.html"))
        .expect("Failed to load day-of reminder template");
    tera.add_raw_template("reminder_next_day.html", include_str!("../templates/reminder_next_day.html"))
        .expect("Failed to load next-day reminder template");
    tera.add_raw_template("staff_notification.html", include_str!("../templates/staff_notification.html"))
        .expect("Failed to load staff notification template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            vehicle_repo: Arc::new(PostgresVehicleRepo::new(pool.clone())),
            customer_repo: Arc::new(PostgresCustomerRepo::new(pool.clone())),
            test_drive_repo: Arc::new(PostgresTestDriveRepo::new(pool.clone())),
            blocked_slot_repo: Arc::new(PostgresBlockedSlotRepo::new(pool.clone())),
            submission_repo: Arc::new(PostgresSubmissionRepo::new(pool.clone())),
            transaction_repo: Arc::new(PostgresTransactionRepo::new(pool.clone())),
            metrics_repo: Arc::new(PostgresMetricsRepo::new(pool.clone())),
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            vehicle_repo: Arc::new(SqliteVehicleRepo::new(pool.clone())),
            customer_repo: Arc::new(SqliteCustomerRepo::new(pool.clone())),
            test_drive_repo: Arc::new(SqliteTestDriveRepo::new(pool.clone())),
            blocked_slot_repo: Arc::new(SqliteBlockedSlotRepo::new(pool.clone())),
            submission_repo: Arc::new(SqliteSubmissionRepo::new(pool.clone())),
            transaction_repo: Arc::new(SqliteTransactionRepo::new(pool.clone())),
            metrics_repo: Arc::new(SqliteMetricsRepo::new(pool.clone())),
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
