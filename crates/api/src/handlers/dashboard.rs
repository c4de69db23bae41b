//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use remindcare_core::dashboard::DashboardStats;
use remindcare_db::repositories::{PatientRepo, ReminderRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
///
/// Totals, the weekly delivery breakdown, and recent reminder activity.
pub async fn get_dashboard(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let patients = PatientRepo::list(&state.pool).await;
    let reminders = ReminderRepo::list(&state.pool).await;

    Ok(Json(DataResponse {
        data: DashboardStats::compute(&patients, &reminders),
    }))
}
