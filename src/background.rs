use std::sync::Arc;
use std::time::Duration;
use chrono::{NaiveDate, Timelike, Utc};
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::domain::services::reminders::run_reminder_sweep;
use crate::state::AppState;

/// In-process daily trigger for the reminder sweep. Wakes once a minute and
/// fires the sweep the first time the local clock passes the configured hour
/// each day. The sweep itself is idempotent, so a restart mid-day at worst
/// re-runs a sweep that selects nothing.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting reminder sweep worker...");

    let mut last_run: Option<NaiveDate> = None;

    loop {
        let now_local = Utc::now().with_timezone(&state.config.timezone);
        let today = now_local.date_naive();

        let due = now_local.hour() >= state.config.reminder_hour && last_run != Some(today);

        if due {
            let span = info_span!("reminder_sweep", date = %today);

            let state = state.clone();
            async move {
                match run_reminder_sweep(&state).await {
                    Ok(outcome) => {
                        info!(
                            day_of_sent = outcome.day_of_sent,
                            next_day_sent = outcome.next_day_sent,
                            failures = outcome.failures,
                            "Scheduled reminder sweep completed"
                        );
                    }
                    // A store fault fails the whole tick; the next day's tick
                    // (or the cron endpoint) retries everything still unsent.
                    Err(e) => error!("Scheduled reminder sweep failed: {:?}", e),
                }
            }
            .instrument(span)
            .await;

            last_run = Some(today);
        }

        sleep(Duration::from_secs(60)).await;
    }
}
