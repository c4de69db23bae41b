pub mod health;
pub mod patients;
pub mod profile;
pub mod reminders;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, dashboard, followup};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                          login (public)
/// /auth/logout                         logout (requires auth)
///
/// /patients                            list, create
/// /patients/{id}                       get, update, delete (doctor/admin)
/// /patients/{id}/reminders             reminder history, latest first
///
/// /reminders                           list (search, status, direction)
/// /reminders/{id}/resend               resend (POST)
///
/// /dashboard                           stats, weekly breakdown, recent activity
///
/// /profile                             get, update
/// /profile/notifications               get, update
///
/// /followup                            follow-up date preview
/// ```
///
/// Everything except `/auth/login` requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .nest("/patients", patients::router())
        .nest("/reminders", reminders::router())
        .route("/dashboard", get(dashboard::get_dashboard))
        .nest("/profile", profile::router())
        .route("/followup", get(followup::preview_followup))
}
