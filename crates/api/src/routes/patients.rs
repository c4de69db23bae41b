use axum::routing::get;
use axum::Router;

use crate::handlers::patients;
use crate::state::AppState;

/// Routes mounted at `/patients`.
///
/// ```text
/// GET    /                  -> list_patients
/// POST   /                  -> create_patient
/// GET    /{id}              -> get_patient
/// PUT    /{id}              -> update_patient
/// DELETE /{id}              -> delete_patient
/// GET    /{id}/reminders    -> list_patient_reminders
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/{id}",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route("/{id}/reminders", get(patients::list_patient_reminders))
}
