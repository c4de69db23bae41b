//! Handlers for the signed-in staff member's profile and notification
//! settings.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use remindcare_core::error::CoreError;
use remindcare_core::profile::{UpdateNotificationSettings, UpdateProfile};
use remindcare_core::types::DbId;
use remindcare_db::models::staff::{StaffAccount, StaffProfile, UpdateStaff};
use remindcare_db::repositories::StaffRepo;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

async fn load_account(state: &AppState, user_id: DbId) -> AppResult<StaffAccount> {
    StaffRepo::find_by_id(&state.pool, user_id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id: user_id,
        }))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/profile
pub async fn get_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let account = load_account(&state, user.user_id).await?;
    Ok(Json(DataResponse {
        data: StaffProfile::from(&account),
    }))
}

/// PUT /api/v1/profile
///
/// Update name and email, and optionally the password. Changing the
/// password requires the current one. Tokens already issued keep the old
/// name and email until the next login.
pub async fn update_profile(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let password_hash = if input.wants_password_change() {
        let account = load_account(&state, user.user_id).await?;
        let current_ok = verify_password(&input.current_password, &account.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !current_ok {
            return Err(AppError::Core(CoreError::validation(
                "Current password is incorrect",
            )));
        }
        let hash = hash_password(&input.new_password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        Some(hash)
    } else {
        None
    };

    let password_changed = password_hash.is_some();
    let account = StaffRepo::update(
        &state.pool,
        user.user_id,
        UpdateStaff {
            name: input.name,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, password_changed, "Profile updated");

    Ok(Json(DataResponse {
        data: StaffProfile::from(&account),
    }))
}

// ---------------------------------------------------------------------------
// Notification settings
// ---------------------------------------------------------------------------

/// GET /api/v1/profile/notifications
pub async fn get_notifications(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let account = load_account(&state, user.user_id).await?;
    Ok(Json(DataResponse {
        data: account.notifications,
    }))
}

/// PUT /api/v1/profile/notifications
pub async fn update_notifications(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<UpdateNotificationSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = StaffRepo::update_notifications(&state.pool, user.user_id, input)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Staff",
            id: user.user_id,
        }))?;

    tracing::info!(user_id = user.user_id, "Notification settings updated");

    Ok(Json(DataResponse { data: settings }))
}
