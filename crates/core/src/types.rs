/// Entity ids for patients and reminders.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (appointments, follow-ups, reminder due dates) carry no
/// time-of-day or zone.
pub type Date = chrono::NaiveDate;
