use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /                 -> get_profile
/// PUT  /                 -> update_profile
/// GET  /notifications    -> get_notifications
/// PUT  /notifications    -> update_notifications
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get_profile).put(profile::update_profile))
        .route(
            "/notifications",
            get(profile::get_notifications).put(profile::update_notifications),
        )
}
