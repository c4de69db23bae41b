pub mod auth;
pub mod dashboard;
pub mod followup;
pub mod patients;
pub mod profile;
pub mod reminders;
