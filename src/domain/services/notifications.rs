use std::sync::Arc;
use chrono::NaiveTime;
use tracing::warn;

use crate::domain::models::submission::VehicleSubmission;
use crate::domain::models::test_drive::{ReminderPhase, TestDrive};
use crate::domain::models::vehicle::Vehicle;
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use crate::state::AppState;

/// Template context shared by every customer-facing mail about an appointment.
fn appointment_context(state: &AppState, test_drive: &TestDrive, vehicle: &Vehicle) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("customer_name", &test_drive.customer_name);
    context.insert("vehicle", &vehicle.display_name());
    context.insert("date", &test_drive.date.format("%A, %B %e, %Y").to_string());
    context.insert("time", &display_time(&test_drive.time));
    context.insert("notes", &test_drive.notes);
    context.insert("dealership_name", &state.config.dealership_name);
    context
}

/// 12-hour display form of a stored "HH:MM" label.
fn display_time(time: &str) -> String {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn render(state: &AppState, template: &str, context: &tera::Context) -> Result<String, AppError> {
    state
        .templates
        .render(template, context)
        .map_err(|e| AppError::InternalWithMsg(format!("Template render error ({}): {:?}", template, e)))
}

/// Operator copy. Failures are logged and swallowed: the staff inbox is a
/// convenience, not part of the operation's success.
async fn send_staff_copy(state: &AppState, headline: &str, context: &tera::Context) {
    let mut staff_context = context.clone();
    staff_context.insert("headline", headline);

    let html = match render(state, "staff_notification.html", &staff_context) {
        Ok(html) => html,
        Err(e) => {
            warn!("Failed to render staff notification: {}", e);
            return;
        }
    };

    if let Err(e) = state
        .email_service
        .send(&state.config.notify_email, headline, &html, None, None)
        .await
    {
        warn!("Failed to send staff notification '{}': {}", headline, e);
    }
}

/// Sends the booking confirmation to the customer (with an .ics invite) and a
/// copy to the operator address. The customer send decides success; callers
/// treat an Err as a notification failure to log, never as a booking failure.
pub async fn send_booking_confirmation(
    state: &Arc<AppState>,
    test_drive: &TestDrive,
    vehicle: &Vehicle,
) -> Result<(), AppError> {
    let context = appointment_context(state, test_drive, vehicle);
    let html = render(state, "confirmation.html", &context)?;

    let subject = format!(
        "Your test drive is booked: {} on {}",
        vehicle.display_name(),
        test_drive.date.format("%B %e")
    );

    let ics = generate_ics(
        test_drive,
        vehicle,
        state.config.timezone,
        state.config.slot_minutes,
        &state.config.dealership_name,
    );

    state
        .email_service
        .send(
            &test_drive.customer_email,
            &subject,
            &html,
            ics.as_ref().map(|_| "test-drive.ics"),
            ics.as_deref().map(str::as_bytes),
        )
        .await?;

    send_staff_copy(
        state,
        &format!(
            "New test drive: {} on {} at {}",
            test_drive.customer_name,
            test_drive.date,
            display_time(&test_drive.time)
        ),
        &context,
    )
    .await;

    Ok(())
}

/// Sends a day-of or next-day reminder to the customer plus an operator copy.
/// The caller only marks the reminder flag when this returns Ok.
pub async fn send_reminder(
    state: &Arc<AppState>,
    test_drive: &TestDrive,
    vehicle: &Vehicle,
    phase: ReminderPhase,
) -> Result<(), AppError> {
    let context = appointment_context(state, test_drive, vehicle);

    let (template, subject) = match phase {
        ReminderPhase::DayOf => (
            "reminder_day_of.html",
            format!(
                "Today: your {} test drive at {}",
                vehicle.display_name(),
                display_time(&test_drive.time)
            ),
        ),
        ReminderPhase::NextDay => (
            "reminder_next_day.html",
            format!(
                "Tomorrow: your {} test drive at {}",
                vehicle.display_name(),
                display_time(&test_drive.time)
            ),
        ),
    };

    let html = render(state, template, &context)?;

    state
        .email_service
        .send(&test_drive.customer_email, &subject, &html, None, None)
        .await?;

    let when = match phase {
        ReminderPhase::DayOf => "today",
        ReminderPhase::NextDay => "tomorrow",
    };
    send_staff_copy(
        state,
        &format!(
            "Test drive {}: {} at {}",
            when,
            test_drive.customer_name,
            display_time(&test_drive.time)
        ),
        &context,
    )
    .await;

    Ok(())
}

/// Operator heads-up for a new sell/trade intake form. Entirely best-effort.
pub async fn send_submission_alert(state: &Arc<AppState>, submission: &VehicleSubmission) {
    let mut context = tera::Context::new();
    context.insert("customer_name", &submission.customer_name);
    context.insert(
        "vehicle",
        &format!("{} {} {}", submission.year, submission.make, submission.model),
    );
    context.insert("date", &submission.created_at.format("%Y-%m-%d").to_string());
    context.insert("time", &"");
    context.insert("notes", &submission.notes);
    context.insert("dealership_name", &state.config.dealership_name);

    let kind = if submission.kind == "TRADE_IN" { "trade-in" } else { "sell" };
    send_staff_copy(
        state,
        &format!("New {} submission from {}", kind, submission.customer_name),
        &context,
    )
    .await;
}
