//! Repository for the reminder queue.

use remindcare_core::reminder::Reminder;
use remindcare_core::types::{DbId, Timestamp};

use crate::DbPool;

/// Provides data access for reminders.
pub struct ReminderRepo;

impl ReminderRepo {
    pub async fn list(pool: &DbPool) -> Vec<Reminder> {
        pool.reminders.read().await.rows.clone()
    }

    pub async fn list_for_patient(pool: &DbPool, patient_id: DbId) -> Vec<Reminder> {
        let table = pool.reminders.read().await;
        table
            .rows
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect()
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Reminder> {
        let table = pool.reminders.read().await;
        table.rows.iter().find(|r| r.id == id).cloned()
    }

    /// Record a successful (re)send at `now`. Returns `None` for unknown ids.
    pub async fn mark_sent(pool: &DbPool, id: DbId, now: Timestamp) -> Option<Reminder> {
        let mut table = pool.reminders.write().await;
        let reminder = table.rows.iter_mut().find(|r| r.id == id)?;
        reminder.mark_sent(now);
        Some(reminder.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use remindcare_core::reminder::ReminderStatus;

    use super::*;
    use crate::{seed, Database};

    fn pool() -> DbPool {
        Arc::new(Database::new(seed::patients(), seed::reminders(), vec![]))
    }

    #[tokio::test]
    async fn mark_sent_updates_stored_row() {
        let pool = pool();
        let now = chrono::Utc::now();

        let updated = ReminderRepo::mark_sent(&pool, 3, now).await.unwrap();
        assert_eq!(updated.status, ReminderStatus::Sent);

        let stored = ReminderRepo::find_by_id(&pool, 3).await.unwrap();
        assert_eq!(stored.sent_at, Some(now));
    }

    #[tokio::test]
    async fn mark_sent_unknown_id() {
        let pool = pool();
        assert!(ReminderRepo::mark_sent(&pool, 42, chrono::Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn list_for_patient_filters() {
        let pool = pool();
        let reminders = ReminderRepo::list_for_patient(&pool, 2).await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].patient, "Alice Smith");
    }
}
