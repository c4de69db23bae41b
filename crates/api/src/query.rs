//! Query-string parameters for the list endpoints.
//!
//! Each params struct converts into a typed `ListQuery` for the core engine.
//! Status filters arrive as strings so that `all` and an empty value can mean
//! "no filter"; anything else must name a real status.

use remindcare_core::followup::AppointmentType;
use remindcare_core::patient::{PatientQuery, PatientSortKey};
use remindcare_core::query::{SortDirection, SortSpec, StatusFilter};
use remindcare_core::reminder::{ReminderQuery, ReminderSortKey, ReminderStatus};
use serde::Deserialize;

use crate::error::AppError;

/// `GET /patients?search=&appointment_type=&sort=&direction=`
#[derive(Debug, Default, Deserialize)]
pub struct PatientListParams {
    pub search: Option<String>,
    pub appointment_type: Option<String>,
    /// Without a sort key the roster keeps its insertion order.
    pub sort: Option<PatientSortKey>,
    pub direction: Option<SortDirection>,
}

impl PatientListParams {
    pub fn into_query(self) -> Result<PatientQuery, AppError> {
        Ok(PatientQuery {
            term: self.search.unwrap_or_default(),
            status: parse_filter(
                self.appointment_type.as_deref(),
                AppointmentType::parse,
                "appointment_type",
            )?,
            sort: self.sort.map(|key| SortSpec {
                key,
                direction: self.direction.unwrap_or_default(),
            }),
        })
    }
}

/// `GET /reminders?search=&status=&direction=`
#[derive(Debug, Default, Deserialize)]
pub struct ReminderListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    /// The queue is always ordered by due date; ascending unless told otherwise.
    pub direction: Option<SortDirection>,
}

impl ReminderListParams {
    pub fn into_query(self) -> Result<ReminderQuery, AppError> {
        Ok(ReminderQuery {
            term: self.search.unwrap_or_default(),
            status: parse_filter(self.status.as_deref(), ReminderStatus::parse, "status")?,
            sort: Some(SortSpec {
                key: ReminderSortKey::Date,
                direction: self.direction.unwrap_or_default(),
            }),
        })
    }
}

fn parse_filter<S>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Option<S>,
    param: &'static str,
) -> Result<StatusFilter<S>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(StatusFilter::All),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(StatusFilter::All),
        Some(v) => parse(v)
            .map(StatusFilter::Only)
            .ok_or_else(|| AppError::UnknownFilter {
                param,
                value: v.to_string(),
            }),
    }
}
