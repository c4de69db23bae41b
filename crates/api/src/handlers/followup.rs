//! Follow-up date preview for the add-patient form.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use remindcare_core::followup::{followup_date, AppointmentType};
use remindcare_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FollowupParams {
    pub appointment_type: String,
    pub appointment_date: Date,
}

#[derive(Debug, Serialize)]
pub struct FollowupPreview {
    pub appointment_type: AppointmentType,
    pub appointment_date: Date,
    pub followup_days: u64,
    pub next_followup: Date,
}

/// GET /api/v1/followup?appointment_type=&appointment_date=
pub async fn preview_followup(
    RequireAuth(_user): RequireAuth,
    State(_state): State<AppState>,
    Query(params): Query<FollowupParams>,
) -> AppResult<impl IntoResponse> {
    let kind = AppointmentType::parse(&params.appointment_type).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown appointment_type '{}'",
            params.appointment_type
        ))
    })?;

    let next_followup = followup_date(params.appointment_date, kind)
        .ok_or_else(|| AppError::BadRequest("Appointment date is out of range".into()))?;

    Ok(Json(DataResponse {
        data: FollowupPreview {
            appointment_type: kind,
            appointment_date: params.appointment_date,
            followup_days: kind.followup_days(),
            next_followup,
        },
    }))
}
