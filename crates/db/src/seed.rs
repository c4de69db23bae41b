//! Demo roster and reminder queue loaded into every fresh database.

use chrono::{NaiveDate, TimeZone, Utc};
use remindcare_core::followup::AppointmentType;
use remindcare_core::patient::Patient;
use remindcare_core::reminder::{Reminder, ReminderStatus};
use remindcare_core::types::{Date, DbId, Timestamp};

pub const PATIENT_COUNT: usize = 5;
pub const REMINDER_COUNT: usize = 5;

fn date(y: i32, m: u32, d: u32) -> Date {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid seed timestamp")
}

struct SeedPatient {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    last: (i32, u32, u32),
    kind: AppointmentType,
    next: (i32, u32, u32),
    notes: &'static str,
}

const PATIENTS: [SeedPatient; PATIENT_COUNT] = [
    SeedPatient {
        name: "John Doe",
        phone: "+1234567890",
        email: "john@example.com",
        last: (2024, 6, 15),
        kind: AppointmentType::GeneralCheckup,
        next: (2024, 6, 29),
        notes: "Patient has a history of hypertension. Recommended regular monitoring of blood pressure.",
    },
    SeedPatient {
        name: "Alice Smith",
        phone: "+1987654321",
        email: "alice@example.com",
        last: (2024, 6, 10),
        kind: AppointmentType::DentalCheckup,
        next: (2024, 7, 10),
        notes: "",
    },
    SeedPatient {
        name: "Bob Johnson",
        phone: "+1122334455",
        email: "bob@example.com",
        last: (2024, 6, 20),
        kind: AppointmentType::LabTest,
        next: (2024, 6, 27),
        notes: "",
    },
    SeedPatient {
        name: "Emily Davis",
        phone: "+1555666777",
        email: "emily@example.com",
        last: (2024, 6, 18),
        kind: AppointmentType::Vaccination,
        next: (2024, 7, 9),
        notes: "",
    },
    SeedPatient {
        name: "Michael Wilson",
        phone: "+1999888777",
        email: "michael@example.com",
        last: (2024, 6, 5),
        kind: AppointmentType::Other,
        next: (2024, 6, 15),
        notes: "",
    },
];

pub fn patients() -> Vec<Patient> {
    PATIENTS
        .iter()
        .zip(1..)
        .map(|(p, id)| Patient {
            id,
            name: p.name.into(),
            phone: p.phone.into(),
            email: p.email.into(),
            last_appointment: date(p.last.0, p.last.1, p.last.2),
            appointment_type: p.kind,
            next_followup: date(p.next.0, p.next.1, p.next.2),
            notes: p.notes.into(),
        })
        .collect()
}

pub fn reminders() -> Vec<Reminder> {
    let roster = patients();
    let entry = |id: DbId,
                 patient_id: DbId,
                 due: Date,
                 kind: AppointmentType,
                 status: ReminderStatus,
                 sent_at: Option<Timestamp>,
                 message: &str| {
        let patient = &roster[(patient_id - 1) as usize];
        Reminder {
            id,
            patient_id,
            patient: patient.name.clone(),
            phone: patient.phone.clone(),
            date: due,
            appointment_type: kind,
            status,
            message: message.into(),
            sent_at,
        }
    };

    vec![
        entry(
            1,
            1,
            date(2024, 6, 29),
            AppointmentType::GeneralCheckup,
            ReminderStatus::Pending,
            None,
            "Hi John! Your follow-up appointment is tomorrow at 10 AM. Tip: Stay hydrated before your visit!",
        ),
        entry(
            2,
            2,
            date(2024, 6, 25),
            AppointmentType::LabTest,
            ReminderStatus::Sent,
            Some(at(2024, 6, 24, 14, 0)),
            "Hello Alice, this is a reminder for your lab test review appointment tomorrow at 2 PM. Remember to bring your previous test results.",
        ),
        entry(
            3,
            3,
            date(2024, 6, 28),
            AppointmentType::Vaccination,
            ReminderStatus::Failed,
            Some(at(2024, 6, 27, 11, 0)),
            "Hi Bob, your vaccination appointment is scheduled for tomorrow at 11 AM. Please arrive 15 minutes early to complete paperwork.",
        ),
        entry(
            4,
            4,
            date(2024, 7, 5),
            AppointmentType::DentalCheckup,
            ReminderStatus::Pending,
            None,
            "Hello Emily, this is a reminder for your dental check-up appointment tomorrow at 9 AM. Remember to brush and floss before your visit!",
        ),
        entry(
            5,
            5,
            date(2024, 6, 30),
            AppointmentType::Other,
            ReminderStatus::Pending,
            None,
            "Hi Michael, your follow-up appointment is tomorrow at 3 PM. If you need to reschedule, please call us at least 24 hours in advance.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use remindcare_core::followup::followup_date;

    use super::*;

    #[test]
    fn seeded_followups_match_schedule() {
        for patient in patients() {
            assert_eq!(
                followup_date(patient.last_appointment, patient.appointment_type),
                Some(patient.next_followup),
                "{}",
                patient.name
            );
        }
    }

    #[test]
    fn reminders_point_at_seeded_patients() {
        let roster = patients();
        for reminder in reminders() {
            let patient = roster.iter().find(|p| p.id == reminder.patient_id).unwrap();
            assert_eq!(patient.name, reminder.patient);
            assert_eq!(patient.phone, reminder.phone);
        }
    }

    #[test]
    fn only_attempted_reminders_have_sent_at() {
        for reminder in reminders() {
            assert_eq!(
                reminder.sent_at.is_some(),
                reminder.status != ReminderStatus::Pending
            );
        }
    }
}
