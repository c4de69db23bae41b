//! Handlers for the reminder queue.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use remindcare_core::error::CoreError;
use remindcare_core::query::apply_owned;
use remindcare_core::types::DbId;
use remindcare_db::repositories::ReminderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::ReminderListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/reminders
pub async fn list_reminders(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ReminderListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let reminders = ReminderRepo::list(&state.pool).await;

    Ok(Json(DataResponse {
        data: apply_owned(&reminders, &query),
    }))
}

/// POST /api/v1/reminders/{id}/resend
///
/// Delivery is simulated: the reminder is marked sent immediately. Any
/// status can be resent, including reminders that already went out.
pub async fn resend_reminder(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(reminder_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let reminder = ReminderRepo::mark_sent(&state.pool, reminder_id, chrono::Utc::now())
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Reminder",
            id: reminder_id,
        }))?;

    tracing::info!(
        reminder_id,
        patient_id = reminder.patient_id,
        user_id = user.user_id,
        "Reminder resent",
    );

    Ok(Json(DataResponse { data: reminder }))
}
