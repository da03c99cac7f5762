use std::sync::Arc;
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::models::test_drive::ReminderPhase;
use crate::domain::services::notifications;
use crate::error::AppError;
use crate::state::AppState;

/// Aggregate result of one sweep tick. Individual send failures are counted
/// here rather than failing the tick; only a store error aborts the sweep.
#[derive(Debug, Serialize, Default)]
pub struct SweepOutcome {
    pub day_of_sent: u32,
    pub next_day_sent: u32,
    pub failures: u32,
}

/// Runs both reminder passes over the deployment's civil calendar: day-of for
/// appointments dated today, next-day for appointments dated tomorrow. Safe to
/// run any number of times per day; the per-phase sent flags make re-runs
/// no-ops for already-notified appointments.
pub async fn run_reminder_sweep(state: &Arc<AppState>) -> Result<SweepOutcome, AppError> {
    let today = Utc::now().with_timezone(&state.config.timezone).date_naive();
    let tomorrow = today + Duration::days(1);

    let mut outcome = SweepOutcome::default();

    let (sent, failed) = run_phase(state, today, ReminderPhase::DayOf).await?;
    outcome.day_of_sent = sent;
    outcome.failures += failed;

    let (sent, failed) = run_phase(state, tomorrow, ReminderPhase::NextDay).await?;
    outcome.next_day_sent = sent;
    outcome.failures += failed;

    info!(
        day_of_sent = outcome.day_of_sent,
        next_day_sent = outcome.next_day_sent,
        failures = outcome.failures,
        "Reminder sweep finished"
    );

    Ok(outcome)
}

async fn run_phase(
    state: &Arc<AppState>,
    date: NaiveDate,
    phase: ReminderPhase,
) -> Result<(u32, u32), AppError> {
    let due = state.test_drive_repo.find_reminder_due(date, phase).await?;

    let mut sent = 0u32;
    let mut failures = 0u32;

    for test_drive in due {
        let vehicle = match state.vehicle_repo.find_by_id(&test_drive.vehicle_id).await? {
            Some(v) => v,
            None => {
                warn!(
                    "Skipping reminder for {}: vehicle {} no longer exists",
                    test_drive.id, test_drive.vehicle_id
                );
                failures += 1;
                continue;
            }
        };

        match notifications::send_reminder(state, &test_drive, &vehicle, phase).await {
            Ok(()) => {
                // Flag flips only after a successful send, and only if it is
                // still unset; a lost CAS means an overlapping sweep got there
                // first and this send was the duplicate.
                if state.test_drive_repo.mark_reminder_sent(&test_drive.id, phase).await? {
                    sent += 1;
                } else {
                    info!(
                        "Reminder flag for {} ({:?}) already set by a concurrent sweep",
                        test_drive.id, phase
                    );
                }
            }
            Err(e) => {
                warn!(
                    "Reminder send failed for {} ({:?}), will retry next sweep: {}",
                    test_drive.id, phase, e
                );
                failures += 1;
            }
        }
    }

    Ok((sent, failures))
}
