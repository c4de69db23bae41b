//! In-memory data layer for the RemindCare API.
//!
//! The clinic data lives in a [`Database`] of `RwLock`-guarded tables that is
//! seeded at startup and shared as a [`DbPool`]. Repositories in
//! [`repositories`] take the pool the same way a SQL-backed repository would
//! take a connection pool, so handlers never touch the locks directly.

pub mod models;
pub mod repositories;
pub mod seed;

use std::sync::Arc;

use remindcare_core::patient::Patient;
use remindcare_core::reminder::Reminder;
use remindcare_core::types::DbId;
use tokio::sync::RwLock;

use remindcare_core::profile::NotificationSettings;

use crate::models::staff::{CreateStaff, StaffAccount};

/// Cheaply cloneable handle to the shared [`Database`].
pub type DbPool = Arc<Database>;

/// Rows of one collection plus its id sequence.
#[derive(Debug)]
pub struct Table<T> {
    pub(crate) rows: Vec<T>,
    next_id: DbId,
}

impl<T> Table<T> {
    fn new(rows: Vec<T>, id_of: impl Fn(&T) -> DbId) -> Self {
        let next_id = rows.iter().map(id_of).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    /// Build a row under the next id and append it. The id is consumed only
    /// when `build` succeeds; ids are never reused, even after deletes.
    pub(crate) fn insert_with<E>(
        &mut self,
        build: impl FnOnce(DbId) -> Result<T, E>,
    ) -> Result<&T, E> {
        let row = build(self.next_id)?;
        self.next_id += 1;
        self.rows.push(row);
        Ok(&self.rows[self.rows.len() - 1])
    }
}

#[derive(Debug)]
pub struct Database {
    pub(crate) patients: RwLock<Table<Patient>>,
    pub(crate) reminders: RwLock<Table<Reminder>>,
    pub(crate) staff: RwLock<Table<StaffAccount>>,
}

impl Database {
    pub fn new(patients: Vec<Patient>, reminders: Vec<Reminder>, staff: Vec<StaffAccount>) -> Self {
        Self {
            patients: RwLock::new(Table::new(patients, |p| p.id)),
            reminders: RwLock::new(Table::new(reminders, |r| r.id)),
            staff: RwLock::new(Table::new(staff, |s| s.id)),
        }
    }
}

/// Build the pool with the demo roster, reminder queue, and `staff` accounts.
///
/// Staff ids are assigned in order starting at 1; every account starts with
/// the default notification settings.
pub fn create_pool(staff: Vec<CreateStaff>) -> DbPool {
    let staff = staff
        .into_iter()
        .zip(1..)
        .map(|(input, id)| StaffAccount {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
            password_hash: input.password_hash,
            notifications: NotificationSettings::default(),
        })
        .collect();

    let db = Database::new(seed::patients(), seed::reminders(), staff);
    tracing::info!(
        patients = seed::PATIENT_COUNT,
        reminders = seed::REMINDER_COUNT,
        "Seeded in-memory database"
    );
    Arc::new(db)
}

/// Row counts, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TableCounts {
    pub patients: usize,
    pub reminders: usize,
    pub staff: usize,
}

pub async fn table_counts(pool: &DbPool) -> TableCounts {
    TableCounts {
        patients: pool.patients.read().await.rows.len(),
        reminders: pool.reminders.read().await.rows.len(),
        staff: pool.staff.read().await.rows.len(),
    }
}
