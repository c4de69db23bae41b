//! Appointment types and follow-up scheduling.
//!
//! Every appointment type carries a fixed follow-up offset; the next
//! follow-up date of a patient is the appointment date plus that offset.

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Kind of appointment a patient was last seen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    GeneralCheckup,
    LabTest,
    DentalCheckup,
    Vaccination,
    Other,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 5] = [
        Self::GeneralCheckup,
        Self::LabTest,
        Self::DentalCheckup,
        Self::Vaccination,
        Self::Other,
    ];

    /// Days between the appointment and the follow-up.
    pub fn followup_days(self) -> u64 {
        match self {
            Self::GeneralCheckup => 14,
            Self::LabTest => 7,
            Self::DentalCheckup => 30,
            Self::Vaccination => 21,
            Self::Other => 10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GeneralCheckup => "General check-up",
            Self::LabTest => "Lab test review",
            Self::DentalCheckup => "Dental check-up",
            Self::Vaccination => "Vaccination",
            Self::Other => "Other",
        }
    }

    /// Wire value, e.g. `"lab-test"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GeneralCheckup => "general-checkup",
            Self::LabTest => "lab-test",
            Self::DentalCheckup => "dental-checkup",
            Self::Vaccination => "vaccination",
            Self::Other => "other",
        }
    }

    /// Parse a wire value (`"dental-checkup"`) or a display label
    /// (`"Dental check-up"`), ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|t| {
            t.as_str().eq_ignore_ascii_case(value) || t.label().eq_ignore_ascii_case(value)
        })
    }
}

impl std::fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Follow-up date for an appointment of `kind` held on `appointment_date`.
///
/// Returns `None` only if the result would overflow the calendar.
pub fn followup_date(appointment_date: Date, kind: AppointmentType) -> Option<Date> {
    appointment_date.checked_add_days(chrono::Days::new(kind.followup_days()))
}
