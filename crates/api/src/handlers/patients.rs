//! Handlers for the patient roster.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use remindcare_core::error::CoreError;
use remindcare_core::patient::{CreatePatient, UpdatePatient};
use remindcare_core::query::{apply_owned, SortDirection};
use remindcare_core::reminder::{ReminderQuery, ReminderSortKey};
use remindcare_core::types::DbId;
use remindcare_db::repositories::{PatientRepo, ReminderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireRosterManager};
use crate::query::PatientListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Patient",
        id,
    })
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// GET /api/v1/patients
///
/// Search by name/phone/email, filter by appointment type, optionally sort
/// by a date column.
pub async fn list_patients(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PatientListParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.into_query()?;
    let patients = PatientRepo::list(&state.pool).await;

    Ok(Json(DataResponse {
        data: apply_owned(&patients, &query),
    }))
}

/// POST /api/v1/patients
///
/// Add a patient. The next follow-up is derived from the appointment type.
pub async fn create_patient(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreatePatient>,
) -> AppResult<impl IntoResponse> {
    input.validate(chrono::Utc::now().date_naive())?;

    let patient = PatientRepo::create(&state.pool, input).await?;

    tracing::info!(
        patient_id = patient.id,
        appointment_type = %patient.appointment_type.as_str(),
        next_followup = %patient.next_followup,
        user_id = user.user_id,
        "Patient added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: patient })))
}

// ---------------------------------------------------------------------------
// Single patient
// ---------------------------------------------------------------------------

/// GET /api/v1/patients/{id}
pub async fn get_patient(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let patient = PatientRepo::find_by_id(&state.pool, patient_id)
        .await
        .ok_or_else(|| not_found(patient_id))?;

    Ok(Json(DataResponse { data: patient }))
}

/// PUT /api/v1/patients/{id}
///
/// Edit contact details and notes. Omitted fields are unchanged.
pub async fn update_patient(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
    Json(input): Json<UpdatePatient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let patient = PatientRepo::update(&state.pool, patient_id, input)
        .await?
        .ok_or_else(|| not_found(patient_id))?;

    tracing::info!(patient_id, user_id = user.user_id, "Patient updated");

    Ok(Json(DataResponse { data: patient }))
}

/// DELETE /api/v1/patients/{id}
///
/// Remove a patient and their reminders.
pub async fn delete_patient(
    RequireRosterManager(user): RequireRosterManager,
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PatientRepo::delete(&state.pool, patient_id).await {
        return Err(not_found(patient_id));
    }

    tracing::info!(patient_id, user_id = user.user_id, "Patient deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/patients/{id}/reminders
///
/// Reminder history for one patient, latest first.
pub async fn list_patient_reminders(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(patient_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if PatientRepo::find_by_id(&state.pool, patient_id).await.is_none() {
        return Err(not_found(patient_id));
    }

    let reminders = ReminderRepo::list_for_patient(&state.pool, patient_id).await;
    let query = ReminderQuery::new().sort_by(ReminderSortKey::Date, SortDirection::Desc);

    Ok(Json(DataResponse {
        data: apply_owned(&reminders, &query),
    }))
}
