use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Which offset decides the calendar day of a timestamp.
///
/// The weekend test, the grouping key, the weekday label and the rendered
/// creation time all go through the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    /// Convert to UTC before taking the date
    #[default]
    Utc,
    /// Use the offset embedded in the timestamp string
    Embedded,
}

impl DayBoundary {
    /// Wall-clock date and time of `timestamp` under this policy
    pub fn local_datetime(self, timestamp: &DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            DayBoundary::Utc => timestamp.with_timezone(&Utc).naive_utc(),
            DayBoundary::Embedded => timestamp.naive_local(),
        }
    }

    /// Calendar date of `timestamp` under this policy
    pub fn calendar_date(self, timestamp: &DateTime<FixedOffset>) -> NaiveDate {
        self.local_datetime(timestamp).date()
    }
}

/// True iff the date falls on a Saturday or Sunday
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Full English weekday name, e.g. "Friday"
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
