//! Dashboard summary derived from the roster and the reminder queue.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::patient::Patient;
use crate::reminder::{Reminder, ReminderStatus};

/// Number of entries in the "recent activity" panel.
pub const RECENT_ACTIVITY_LIMIT: usize = 4;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Delivery outcomes for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDelivery {
    /// Short weekday name, `"Mon"` .. `"Sun"`.
    pub day: String,
    pub sent: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    pub total_reminders: usize,
    pub sent_reminders: usize,
    pub pending_reminders: usize,
    pub failed_reminders: usize,
    /// Monday-first sent/failed counts, bucketed by `sent_at` weekday.
    pub weekly: Vec<DailyDelivery>,
    pub recent: Vec<Reminder>,
}

impl DashboardStats {
    pub fn compute(patients: &[Patient], reminders: &[Reminder]) -> Self {
        let count = |status| reminders.iter().filter(|r| r.status == status).count();

        Self {
            total_patients: patients.len(),
            total_reminders: reminders.len(),
            sent_reminders: count(ReminderStatus::Sent),
            pending_reminders: count(ReminderStatus::Pending),
            failed_reminders: count(ReminderStatus::Failed),
            weekly: weekly_deliveries(reminders),
            recent: recent_activity(reminders),
        }
    }

    /// Share of attempted deliveries that succeeded, in percent.
    ///
    /// `None` until at least one reminder has been attempted.
    pub fn delivery_rate(&self) -> Option<f64> {
        let attempted = self.sent_reminders + self.failed_reminders;
        if attempted == 0 {
            return None;
        }
        Some(self.sent_reminders as f64 * 100.0 / attempted as f64)
    }
}

fn weekly_deliveries(reminders: &[Reminder]) -> Vec<DailyDelivery> {
    let mut week: Vec<DailyDelivery> = WEEK
        .iter()
        .map(|day| DailyDelivery {
            day: day.to_string(),
            sent: 0,
            failed: 0,
        })
        .collect();

    for reminder in reminders {
        let Some(sent_at) = reminder.sent_at else {
            continue;
        };
        let slot = &mut week[sent_at.weekday().num_days_from_monday() as usize];
        match reminder.status {
            ReminderStatus::Sent => slot.sent += 1,
            ReminderStatus::Failed => slot.failed += 1,
            ReminderStatus::Pending => {}
        }
    }

    week
}

/// Most recent delivery attempts first, then pending reminders by due date.
fn recent_activity(reminders: &[Reminder]) -> Vec<Reminder> {
    let mut attempted: Vec<&Reminder> = reminders.iter().filter(|r| r.sent_at.is_some()).collect();
    attempted.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));

    let mut pending: Vec<&Reminder> = reminders.iter().filter(|r| r.sent_at.is_none()).collect();
    pending.sort_by_key(|r| r.date);

    attempted
        .into_iter()
        .chain(pending)
        .take(RECENT_ACTIVITY_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::followup::AppointmentType;
    use crate::types::{DbId, Timestamp};

    fn at(day: u32, hour: u32) -> Timestamp {
        // 2024-07-01 is a Monday.
        Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap()
    }

    fn reminder(id: DbId, status: ReminderStatus, sent_at: Option<Timestamp>) -> Reminder {
        Reminder {
            id,
            patient_id: id,
            patient: format!("Patient {id}"),
            phone: "+1234567890".into(),
            date: "2024-07-05".parse().unwrap(),
            appointment_type: AppointmentType::Vaccination,
            status,
            message: String::new(),
            sent_at,
        }
    }

    #[test]
    fn counts_by_status() {
        let reminders = vec![
            reminder(1, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(2, ReminderStatus::Sent, Some(at(1, 10))),
            reminder(3, ReminderStatus::Failed, Some(at(2, 11))),
            reminder(4, ReminderStatus::Pending, None),
        ];

        let stats = DashboardStats::compute(&[], &reminders);

        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.total_reminders, 4);
        assert_eq!(stats.sent_reminders, 2);
        assert_eq!(stats.failed_reminders, 1);
        assert_eq!(stats.pending_reminders, 1);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        let reminders = vec![
            reminder(1, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(2, ReminderStatus::Failed, Some(at(2, 9))),
            reminder(3, ReminderStatus::Sent, Some(at(7, 9))),
        ];

        let weekly = DashboardStats::compute(&[], &reminders).weekly;

        assert_eq!(weekly.len(), 7);
        assert_eq!(weekly[0].day, "Mon");
        assert_eq!(weekly[0].sent, 1);
        assert_eq!(weekly[1].failed, 1);
        assert_eq!(weekly[6].day, "Sun");
        assert_eq!(weekly[6].sent, 1);
    }

    #[test]
    fn recent_activity_orders_attempts_then_pending() {
        let reminders = vec![
            reminder(1, ReminderStatus::Pending, None),
            reminder(2, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(3, ReminderStatus::Failed, Some(at(1, 11))),
            reminder(4, ReminderStatus::Sent, Some(at(1, 10))),
            reminder(5, ReminderStatus::Pending, None),
        ];

        let recent = DashboardStats::compute(&[], &reminders).recent;
        let ids: Vec<DbId> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn delivery_rate() {
        let reminders = vec![
            reminder(1, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(2, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(3, ReminderStatus::Sent, Some(at(1, 9))),
            reminder(4, ReminderStatus::Failed, Some(at(1, 9))),
        ];
        let stats = DashboardStats::compute(&[], &reminders);
        assert_eq!(stats.delivery_rate(), Some(75.0));

        assert_eq!(DashboardStats::compute(&[], &[]).delivery_rate(), None);
    }
}
