//! Repository layer: one unit struct per collection, taking the [`DbPool`].
//!
//! [`DbPool`]: crate::DbPool

pub mod patient_repo;
pub mod reminder_repo;
pub mod staff_repo;

pub use patient_repo::PatientRepo;
pub use reminder_repo::ReminderRepo;
pub use staff_repo::StaffRepo;
