//! Patient roster entries and their create/update forms.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::followup::{followup_date, AppointmentType};
use crate::query::{ListQuery, Record};
use crate::types::{Date, DbId};
use crate::validation::{
    validate_appointment_date, validate_email, validate_name, validate_phone,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub last_appointment: Date,
    pub appointment_type: AppointmentType,
    pub next_followup: Date,
    #[serde(default)]
    pub notes: String,
}

impl Patient {
    /// Initials shown in the roster avatar, e.g. `"JD"` for "John Doe".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Date fields the roster can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientSortKey {
    LastAppointment,
    NextFollowup,
}

/// Roster query: the status filter narrows by appointment type.
pub type PatientQuery = ListQuery<AppointmentType, PatientSortKey>;

impl Record for Patient {
    type Status = AppointmentType;
    type SortKey = PatientSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.phone.as_str(), self.email.as_str()]
    }

    fn status(&self) -> &AppointmentType {
        &self.appointment_type
    }

    fn sort_value(&self, key: PatientSortKey) -> Date {
        match key {
            PatientSortKey::LastAppointment => self.last_appointment,
            PatientSortKey::NextFollowup => self.next_followup,
        }
    }
}

/// Add-patient form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub appointment_date: Date,
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub notes: String,
}

impl CreatePatient {
    /// Check every field against its rule. `today` bounds the appointment date.
    pub fn validate(&self, today: Date) -> Result<(), CoreError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_appointment_date(self.appointment_date, today)?;
        Ok(())
    }

    /// Build the roster entry, deriving the next follow-up from the
    /// appointment type.
    pub fn into_patient(self, id: DbId) -> Result<Patient, CoreError> {
        let next_followup = followup_date(self.appointment_date, self.appointment_type)
            .ok_or_else(|| CoreError::validation("Appointment date is out of range"))?;

        Ok(Patient {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            last_appointment: self.appointment_date,
            appointment_type: self.appointment_type,
            next_followup,
            notes: self.notes,
        })
    }
}

/// Patient-detail edit form. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdatePatient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePatient {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }

    pub fn apply_to(self, patient: &mut Patient) {
        if let Some(name) = self.name {
            patient.name = name.trim().to_string();
        }
        if let Some(email) = self.email {
            patient.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone {
            patient.phone = phone.trim().to_string();
        }
        if let Some(notes) = self.notes {
            patient.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{apply, SortDirection};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn form() -> CreatePatient {
        CreatePatient {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            phone: "+1234567890".into(),
            appointment_date: date("2024-06-15"),
            appointment_type: AppointmentType::GeneralCheckup,
            notes: String::new(),
        }
    }

    #[test]
    fn create_derives_followup() {
        let patient = form().into_patient(7).unwrap();
        assert_eq!(patient.id, 7);
        assert_eq!(patient.last_appointment, date("2024-06-15"));
        assert_eq!(patient.next_followup, date("2024-06-29"));
    }

    #[test]
    fn create_rejects_past_appointment() {
        assert!(form().validate(date("2024-06-16")).is_err());
        assert!(form().validate(date("2024-06-15")).is_ok());
    }

    #[test]
    fn create_rejects_bad_phone() {
        let mut f = form();
        f.phone = "555-1234".into();
        assert!(f.validate(date("2024-06-01")).is_err());
    }

    #[test]
    fn update_only_touches_given_fields() {
        let mut patient = form().into_patient(1).unwrap();
        UpdatePatient {
            notes: Some("History of hypertension.".into()),
            ..Default::default()
        }
        .apply_to(&mut patient);

        assert_eq!(patient.name, "John Doe");
        assert_eq!(patient.notes, "History of hypertension.");
    }

    #[test]
    fn update_validates_present_fields() {
        let update = UpdatePatient {
            email: Some("nope".into()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdatePatient::default().validate().is_ok());
    }

    #[test]
    fn initials_from_name() {
        let patient = form().into_patient(1).unwrap();
        assert_eq!(patient.initials(), "JD");
    }

    #[test]
    fn roster_search_matches_phone_and_email() {
        let mut alice = form();
        alice.name = "Alice Smith".into();
        alice.email = "alice@example.com".into();
        alice.phone = "+1987654321".into();
        let roster = vec![form().into_patient(1).unwrap(), alice.into_patient(2).unwrap()];

        let by_phone = apply(&roster, &PatientQuery::new().search("98765"));
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, 2);

        let by_email = apply(&roster, &PatientQuery::new().search("JOHN@"));
        assert_eq!(by_email[0].id, 1);
    }

    #[test]
    fn roster_sorts_by_next_followup() {
        let mut lab = form();
        lab.appointment_type = AppointmentType::LabTest;
        let roster = vec![form().into_patient(1).unwrap(), lab.into_patient(2).unwrap()];

        let out = apply(
            &roster,
            &PatientQuery::new().sort_by(PatientSortKey::NextFollowup, SortDirection::Asc),
        );
        assert_eq!(out[0].id, 2);
    }
}
