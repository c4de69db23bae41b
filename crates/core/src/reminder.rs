//! Reminder queue entries.

use serde::{Deserialize, Serialize};

use crate::followup::AppointmentType;
use crate::query::{ListQuery, Record};
use crate::types::{Date, DbId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
}

impl ReminderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "sent" => Some(Self::Sent),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: DbId,
    pub patient_id: DbId,
    /// Patient display name at the time the reminder was queued.
    pub patient: String,
    pub phone: String,
    /// Day the reminder is due.
    pub date: Date,
    pub appointment_type: AppointmentType,
    pub status: ReminderStatus,
    pub message: String,
    /// Last delivery attempt, successful or not.
    pub sent_at: Option<Timestamp>,
}

impl Reminder {
    /// Mark the reminder delivered at `now`.
    ///
    /// Any status may be resent, including reminders already delivered.
    pub fn mark_sent(&mut self, now: Timestamp) {
        self.status = ReminderStatus::Sent;
        self.sent_at = Some(now);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderSortKey {
    Date,
}

pub type ReminderQuery = ListQuery<ReminderStatus, ReminderSortKey>;

impl Record for Reminder {
    type Status = ReminderStatus;
    type SortKey = ReminderSortKey;

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.patient.as_str(),
            self.phone.as_str(),
            self.message.as_str(),
        ]
    }

    fn status(&self) -> &ReminderStatus {
        &self.status
    }

    fn sort_value(&self, key: ReminderSortKey) -> Date {
        match key {
            ReminderSortKey::Date => self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::query::{apply, SortDirection};

    fn reminder(id: DbId, date: &str, status: ReminderStatus) -> Reminder {
        Reminder {
            id,
            patient_id: id,
            patient: format!("Patient {id}"),
            phone: "+1234567890".into(),
            date: date.parse().unwrap(),
            appointment_type: AppointmentType::Other,
            status,
            message: "See you tomorrow".into(),
            sent_at: None,
        }
    }

    #[test]
    fn failed_filter_picks_single_reminder() {
        let queue = vec![
            reminder(1, "2024-06-29", ReminderStatus::Sent),
            reminder(2, "2024-06-25", ReminderStatus::Failed),
            reminder(3, "2024-06-28", ReminderStatus::Pending),
        ];

        let out = apply(&queue, &ReminderQuery::new().status(ReminderStatus::Failed));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 2);
    }

    #[test]
    fn queue_sorts_latest_first() {
        let queue = vec![
            reminder(1, "2024-06-29", ReminderStatus::Pending),
            reminder(2, "2024-06-25", ReminderStatus::Sent),
            reminder(3, "2024-07-05", ReminderStatus::Pending),
        ];

        let out = apply(
            &queue,
            &ReminderQuery::new().sort_by(ReminderSortKey::Date, SortDirection::Desc),
        );
        let ids: Vec<DbId> = out.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn mark_sent_records_time() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 9, 30, 0).unwrap();
        let mut r = reminder(1, "2024-06-29", ReminderStatus::Failed);
        r.mark_sent(now);

        assert_eq!(r.status, ReminderStatus::Sent);
        assert_eq!(r.sent_at, Some(now));
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ReminderStatus::parse("FAILED"), Some(ReminderStatus::Failed));
        assert_eq!(ReminderStatus::parse("all"), None);
    }
}
