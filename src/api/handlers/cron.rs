use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::services::reminders::run_reminder_sweep;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Manual trigger for external cron services. The same sweep the in-process
/// worker runs, behind a shared-secret bearer token.
pub async fn run_reminders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    if token != state.config.cron_secret {
        return Err(AppError::Unauthorized);
    }

    info!("Reminder sweep triggered via cron endpoint");
    let outcome = run_reminder_sweep(&state).await?;
    Ok(Json(outcome))
}
