use std::env;
use chrono_tz::Tz;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub dealership_name: String,
    /// Operator address copied on booking confirmations, reminders and intake forms.
    pub notify_email: String,
    /// Shared secret for the externally-triggered reminder cron endpoint.
    pub cron_secret: String,
    /// Civil calendar used for all "today"/"tomorrow" and past-date decisions.
    pub timezone: Tz,
    pub open_time: String,
    pub close_time: String,
    pub slot_minutes: u32,
    /// Local hour at which the in-process worker runs the daily reminder sweep.
    pub reminder_hour: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            dealership_name: env::var("DEALERSHIP_NAME").unwrap_or_else(|_| "Premier Auto Sales".to_string()),
            notify_email: env::var("NOTIFY_EMAIL").unwrap_or_else(|_| "sales@premier-auto.local".to_string()),
            cron_secret: env::var("CRON_SECRET").expect("CRON_SECRET must be set"),
            timezone: env::var("DEALERSHIP_TIMEZONE")
                .unwrap_or_else(|_| "America/Los_Angeles".to_string())
                .parse()
                .expect("DEALERSHIP_TIMEZONE must be a valid IANA timezone"),
            open_time: env::var("OPEN_TIME").unwrap_or_else(|_| "09:00".to_string()),
            close_time: env::var("CLOSE_TIME").unwrap_or_else(|_| "19:00".to_string()),
            slot_minutes: env::var("SLOT_MINUTES").unwrap_or_else(|_| "60".to_string()).parse().expect("SLOT_MINUTES must be a number"),
            reminder_hour: env::var("REMINDER_HOUR").unwrap_or_else(|_| "7".to_string()).parse().expect("REMINDER_HOUR must be a number"),
        }
    }
}
