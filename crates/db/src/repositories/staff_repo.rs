//! Repository for staff accounts and their notification settings.

use remindcare_core::error::CoreError;
use remindcare_core::profile::{NotificationSettings, UpdateNotificationSettings};
use remindcare_core::types::DbId;

use crate::models::staff::{StaffAccount, UpdateStaff};
use crate::DbPool;

/// Provides data access for staff accounts.
pub struct StaffRepo;

impl StaffRepo {
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<StaffAccount> {
        let table = pool.staff.read().await;
        table.rows.iter().find(|s| s.id == id).cloned()
    }

    /// Case-insensitive email lookup, used by login.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Option<StaffAccount> {
        let table = pool.staff.read().await;
        table
            .rows
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
    }

    /// Replace name and email, and the password hash when one is given.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: UpdateStaff,
    ) -> Result<StaffAccount, CoreError> {
        let mut table = pool.staff.write().await;

        if table
            .rows
            .iter()
            .any(|s| s.id != id && s.email.eq_ignore_ascii_case(input.email.trim()))
        {
            return Err(CoreError::Conflict(format!(
                "Email {} is already in use",
                input.email.trim()
            )));
        }

        let account = table
            .rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CoreError::NotFound { entity: "Staff", id })?;

        account.name = input.name.trim().to_string();
        account.email = input.email.trim().to_string();
        if let Some(hash) = input.password_hash {
            account.password_hash = hash;
        }
        Ok(account.clone())
    }

    pub async fn update_notifications(
        pool: &DbPool,
        id: DbId,
        input: UpdateNotificationSettings,
    ) -> Option<NotificationSettings> {
        let mut table = pool.staff.write().await;
        let account = table.rows.iter_mut().find(|s| s.id == id)?;
        input.apply_to(&mut account.notifications);
        Some(account.notifications)
    }
}
