//! Plain-text rendering of each view.
//!
//! Every function is pure: it takes already-fetched data and returns the
//! text to print.

use remindcare_core::dashboard::DashboardStats;
use remindcare_core::followup::AppointmentType;
use remindcare_core::patient::Patient;
use remindcare_core::profile::NotificationSettings;
use remindcare_core::reminder::Reminder;
use remindcare_core::session::CurrentUser;

use crate::client::StaffProfile;

const DATE_FMT: &str = "%b %-d, %Y";

pub fn login_prompt() -> String {
    "Not signed in. Run `remindcare login --email <email>` to start a session.".to_string()
}

pub fn whoami(user: Option<&CurrentUser>) -> String {
    match user {
        Some(u) => format!("{} <{}> ({}), id {}", u.name, u.email, u.role, u.id),
        None => "Not signed in.".to_string(),
    }
}

pub fn dashboard(stats: &DashboardStats) -> String {
    let mut lines = vec![
        "Dashboard".to_string(),
        String::new(),
        format!("  Patients          {}", stats.total_patients),
        format!("  Reminders         {}", stats.total_reminders),
        format!("    sent            {}", stats.sent_reminders),
        format!("    pending         {}", stats.pending_reminders),
        format!("    failed          {}", stats.failed_reminders),
    ];
    if let Some(rate) = stats.delivery_rate() {
        lines.push(format!("  Delivery rate     {rate:.1}%"));
    }

    lines.push(String::new());
    lines.push("This week (sent / failed)".to_string());
    for day in &stats.weekly {
        lines.push(format!("  {:<4} {:>3} / {:<3}", day.day, day.sent, day.failed));
    }

    lines.push(String::new());
    lines.push("Recent activity".to_string());
    if stats.recent.is_empty() {
        lines.push("  Nothing yet.".to_string());
    }
    for r in &stats.recent {
        lines.push(format!(
            "  #{:<4} {:<20} {:<8} {}",
            r.id,
            r.patient,
            r.status,
            r.date.format(DATE_FMT)
        ));
    }

    lines.join("\n")
}

pub fn patient_table(patients: &[Patient]) -> String {
    if patients.is_empty() {
        return "No patients match.".to_string();
    }

    let mut lines = vec![format!(
        "{:<5} {:<4} {:<20} {:<14} {:<18} {:<14} {}",
        "ID", "", "NAME", "PHONE", "TYPE", "LAST VISIT", "NEXT FOLLOW-UP"
    )];
    for p in patients {
        lines.push(format!(
            "{:<5} {:<4} {:<20} {:<14} {:<18} {:<14} {}",
            p.id,
            p.initials(),
            p.name,
            p.phone,
            p.appointment_type.label(),
            p.last_appointment.format(DATE_FMT),
            p.next_followup.format(DATE_FMT)
        ));
    }
    lines.push(format!("{} patient(s)", patients.len()));
    lines.join("\n")
}

pub fn patient_detail(patient: &Patient, history: &[Reminder]) -> String {
    let mut lines = vec![
        format!("{} ({})", patient.name, patient.initials()),
        format!("  Email             {}", patient.email),
        format!("  Phone             {}", patient.phone),
        format!("  Appointment type  {}", patient.appointment_type.label()),
        format!("  Last appointment  {}", patient.last_appointment.format(DATE_FMT)),
        format!("  Next follow-up    {}", patient.next_followup.format(DATE_FMT)),
    ];
    if !patient.notes.is_empty() {
        lines.push(format!("  Notes             {}", patient.notes));
    }

    lines.push(String::new());
    lines.push("Reminder history".to_string());
    if history.is_empty() {
        lines.push("  No reminders sent yet.".to_string());
    }
    for r in history {
        lines.push(format!(
            "  #{:<4} {:<14} {:<8} {}",
            r.id,
            r.date.format(DATE_FMT),
            r.status,
            r.message
        ));
    }
    lines.join("\n")
}

pub fn reminder_table(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "No reminders match.".to_string();
    }

    let mut lines = vec![format!(
        "{:<5} {:<20} {:<14} {:<14} {:<18} {}",
        "ID", "PATIENT", "PHONE", "DATE", "TYPE", "STATUS"
    )];
    for r in reminders {
        lines.push(format!(
            "{:<5} {:<20} {:<14} {:<14} {:<18} {}",
            r.id,
            r.patient,
            r.phone,
            r.date.format(DATE_FMT),
            r.appointment_type.label(),
            r.status
        ));
    }
    lines.join("\n")
}

pub fn reminder_resent(reminder: &Reminder) -> String {
    let at = reminder
        .sent_at
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();
    format!(
        "Reminder #{} to {} marked {} at {}",
        reminder.id, reminder.patient, reminder.status, at
    )
}

/// Field guide for `add-patient`, with each type's follow-up offset.
pub fn add_patient_form() -> String {
    let mut lines = vec![
        "Add patient".to_string(),
        String::new(),
        "  remindcare add-patient --name <name> --email <email> --phone <phone> \\".to_string(),
        "      --date <YYYY-MM-DD> --type <type> [--notes <text>]".to_string(),
        String::new(),
        "Appointment types".to_string(),
    ];
    for kind in AppointmentType::ALL {
        lines.push(format!(
            "  {:<16} {:<18} follow-up after {} days",
            kind.as_str(),
            kind.label(),
            kind.followup_days()
        ));
    }
    lines.join("\n")
}

pub fn profile(profile: &StaffProfile, notifications: &NotificationSettings) -> String {
    let flag = |on: bool| if on { "on" } else { "off" };
    [
        format!("{} <{}>", profile.name, profile.email),
        format!("  Role              {}", profile.role),
        String::new(),
        "Notifications".to_string(),
        format!("  Email             {}", flag(notifications.email_notifications)),
        format!("  SMS               {}", flag(notifications.sms_notifications)),
        format!("  Daily summary     {}", flag(notifications.reminder_summary)),
        format!("  Failed reminders  {}", flag(notifications.failed_reminders)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use remindcare_core::reminder::ReminderStatus;

    use super::*;

    fn patient() -> Patient {
        Patient {
            id: 1,
            name: "John Doe".into(),
            phone: "+1234567890".into(),
            email: "john.doe@example.com".into(),
            last_appointment: "2024-06-15".parse().unwrap(),
            appointment_type: AppointmentType::GeneralCheckup,
            next_followup: "2024-06-29".parse().unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn patient_table_lists_rows_and_count() {
        let out = patient_table(&[patient()]);
        assert!(out.contains("John Doe"));
        assert!(out.contains("JD"));
        assert!(out.contains("Jun 29, 2024"));
        assert!(out.ends_with("1 patient(s)"));
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(patient_table(&[]), "No patients match.");
        assert_eq!(reminder_table(&[]), "No reminders match.");
    }

    #[test]
    fn detail_without_history() {
        let out = patient_detail(&patient(), &[]);
        assert!(out.contains("No reminders sent yet."));
        assert!(!out.contains("Notes"));
    }

    #[test]
    fn form_lists_every_type_with_offset() {
        let out = add_patient_form();
        assert!(out.contains("dental-checkup"));
        assert!(out.contains("follow-up after 30 days"));
        assert!(out.contains("follow-up after 7 days"));
    }

    #[test]
    fn resend_message_names_patient() {
        let reminder = Reminder {
            id: 3,
            patient_id: 3,
            patient: "Bob Johnson".into(),
            phone: "+1122334455".into(),
            date: "2024-06-28".parse().unwrap(),
            appointment_type: AppointmentType::Vaccination,
            status: ReminderStatus::Sent,
            message: String::new(),
            sent_at: Some("2024-07-01T09:30:00Z".parse().unwrap()),
        };
        assert_eq!(
            reminder_resent(&reminder),
            "Reminder #3 to Bob Johnson marked sent at 2024-07-01 09:30 UTC"
        );
    }

    #[test]
    fn whoami_without_session() {
        assert_eq!(whoami(None), "Not signed in.");
    }
}
