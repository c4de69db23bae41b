//! Handlers for the `/auth` resource (login, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use remindcare_core::error::CoreError;
use remindcare_core::validation::{validate_email, validate_password};
use remindcare_db::models::staff::StaffProfile;
use remindcare_db::repositories::StaffRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response. Not wrapped in the data envelope.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: StaffProfile,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password and issue an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Form rules first, so a malformed email is a 400 rather than a 401.
    validate_email(&input.email)?;
    validate_password(&input.password)?;

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let account = StaffRepo::find_by_email(&state.pool, &input.email)
        .await
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(email = %input.email, "Login failed: wrong password");
        return Err(invalid());
    }

    let access_token = generate_access_token(&account, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = account.id, role = %account.role, "Staff logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: StaffProfile::from(&account),
    }))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless, so this only confirms the caller was signed in.
/// The client forgets its token. Returns 204 No Content.
pub async fn logout(auth_user: AuthUser) -> AppResult<StatusCode> {
    tracing::info!(user_id = auth_user.user_id, "Staff logged out");
    Ok(StatusCode::NO_CONTENT)
}
