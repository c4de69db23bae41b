//! Role checks expressed as extractors, so a handler's signature states who
//! may call it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use remindcare_core::error::CoreError;
use remindcare_core::roles::ROSTER_MANAGER_ROLES;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Any signed-in staff member.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state).await.map(Self)
    }
}

/// Staff allowed to remove patients from the roster (doctors and admins).
/// Anyone else gets 403.
pub struct RequireRosterManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireRosterManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_role(&user, ROSTER_MANAGER_ROLES, "Doctor or Admin role required")?;
        Ok(Self(user))
    }
}

fn ensure_role(user: &AuthUser, allowed: &[&str], denial: &str) -> Result<(), AppError> {
    if allowed.contains(&user.role.as_str()) {
        return Ok(());
    }
    tracing::info!(user_id = user.user_id, role = %user.role, "Role check failed");
    Err(AppError::Core(CoreError::Forbidden(denial.to_string())))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use remindcare_core::roles::{ROLE_ADMIN, ROLE_DOCTOR, ROLE_NURSE};

    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: 1,
            role: role.to_string(),
        }
    }

    #[test]
    fn roster_managers_are_doctors_and_admins() {
        for role in [ROLE_DOCTOR, ROLE_ADMIN] {
            assert!(ensure_role(&user(role), ROSTER_MANAGER_ROLES, "no").is_ok());
        }
        assert_matches!(
            ensure_role(&user(ROLE_NURSE), ROSTER_MANAGER_ROLES, "no"),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
