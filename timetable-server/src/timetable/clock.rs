//! Lowering of a wall-clock instant to the feed's string encodings.

use chrono::{Datelike, Local, NaiveDateTime};

/// Reference moment for a timetable query.
///
/// GTFS clock times are zero-padded `"HH:MM:SS"` strings that may exceed
/// `"24:00:00"` for services running past midnight, and dates are
/// `"YYYYMMDD"`. Comparing either as parsed calendar time would break the
/// post-midnight encoding, so the moment is lowered to the same padded
/// string forms once and every comparison stays lexicographic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMoment {
    service_date: String,
    clock_time: String,
    weekday_slot: usize,
}

impl QueryMoment {
    /// Lower a local date-time.
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            service_date: datetime.format("%Y%m%d").to_string(),
            clock_time: datetime.format("%H:%M:%S").to_string(),
            weekday_slot: datetime.weekday().number_from_monday() as usize,
        }
    }

    /// The current local moment.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    /// Today's service date, `"YYYYMMDD"`.
    pub fn service_date(&self) -> &str {
        &self.service_date
    }

    /// The current clock time, `"HH:MM:SS"`.
    pub fn clock_time(&self) -> &str {
        &self.clock_time
    }

    /// Calendar column for today's weekday: Monday..Saturday are 1..6,
    /// Sunday is 7.
    pub fn weekday_slot(&self) -> usize {
        self.weekday_slot
    }
}
