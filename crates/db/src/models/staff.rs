//! Staff accounts: the people who sign in to the dashboard.

use remindcare_core::profile::NotificationSettings;
use remindcare_core::types::DbId;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A stored staff account. Never serialized directly; see [`StaffProfile`].
#[derive(Debug, Clone)]
pub struct StaffAccount {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub notifications: NotificationSettings,
}

/// Public view of a [`StaffAccount`], without the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&StaffAccount> for StaffProfile {
    fn from(account: &StaffAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating an account at startup.
#[derive(Debug, Clone)]
pub struct CreateStaff {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
}

/// Validated profile change. `password_hash` is `Some` only when the password
/// is being replaced.
#[derive(Debug, Clone)]
pub struct UpdateStaff {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}
