use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reminders;
use crate::state::AppState;

/// Routes mounted at `/reminders`.
///
/// ```text
/// GET  /               -> list_reminders
/// POST /{id}/resend    -> resend_reminder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reminders::list_reminders))
        .route("/{id}/resend", post(reminders::resend_reminder))
}
