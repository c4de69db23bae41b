//! Repository for the patient roster.

use remindcare_core::error::CoreError;
use remindcare_core::patient::{CreatePatient, Patient, UpdatePatient};
use remindcare_core::types::DbId;

use crate::DbPool;

/// Provides data access for patients.
pub struct PatientRepo;

impl PatientRepo {
    /// All patients in roster order (insertion order).
    pub async fn list(pool: &DbPool) -> Vec<Patient> {
        pool.patients.read().await.rows.clone()
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Option<Patient> {
        let table = pool.patients.read().await;
        table.rows.iter().find(|p| p.id == id).cloned()
    }

    /// Case-insensitive email lookup.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Option<Patient> {
        let table = pool.patients.read().await;
        table
            .rows
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
    }

    /// Insert a new patient. The input must already be validated.
    ///
    /// Fails with [`CoreError::Conflict`] if another patient uses the same
    /// email address.
    pub async fn create(pool: &DbPool, input: CreatePatient) -> Result<Patient, CoreError> {
        let mut table = pool.patients.write().await;

        if table
            .rows
            .iter()
            .any(|p| p.email.eq_ignore_ascii_case(input.email.trim()))
        {
            return Err(CoreError::Conflict(format!(
                "A patient with email {} already exists",
                input.email.trim()
            )));
        }

        let patient = table.insert_with(|id| input.into_patient(id))?;
        Ok(patient.clone())
    }

    /// Apply a partial update. Returns `None` if the patient does not exist.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: UpdatePatient,
    ) -> Result<Option<Patient>, CoreError> {
        let mut table = pool.patients.write().await;

        if let Some(email) = &input.email {
            if table
                .rows
                .iter()
                .any(|p| p.id != id && p.email.eq_ignore_ascii_case(email.trim()))
            {
                return Err(CoreError::Conflict(format!(
                    "A patient with email {} already exists",
                    email.trim()
                )));
            }
        }

        let Some(patient) = table.rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        input.apply_to(patient);
        Ok(Some(patient.clone()))
    }

    /// Remove a patient and their reminders. Returns `false` if no patient
    /// had this id.
    pub async fn delete(pool: &DbPool, id: DbId) -> bool {
        let mut patients = pool.patients.write().await;
        let before = patients.rows.len();
        patients.rows.retain(|p| p.id != id);
        if patients.rows.len() == before {
            return false;
        }

        let mut reminders = pool.reminders.write().await;
        reminders.rows.retain(|r| r.patient_id != id);
        true
    }
}
