//! Business-hours calendar
//!
//! Due dates are found by walking forward one hour at a time. After each
//! step the reached timestamp counts toward the budget when it falls on a
//! working day with its hour inside `[open_hour, close_hour)`. Holidays are
//! not modelled.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Offset, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Working window used for SLA arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    /// First counted hour of the day (inclusive)
    pub open_hour: u32,
    /// Hour the window closes (exclusive)
    pub close_hour: u32,
    /// Days on which hours count
    pub working_days: Vec<Weekday>,
    /// Offset of the desk's local time from UTC, used for UTC timestamps
    pub utc_offset_minutes: i32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open_hour: 9,
            close_hour: 17,
            working_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            utc_offset_minutes: 0,
        }
    }
}

impl BusinessHours {
    /// Whether the hour starting at `at` is a business hour in `at`'s own zone
    pub fn is_business_hour<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        self.working_days.contains(&at.weekday())
            && (self.open_hour..self.close_hour).contains(&at.hour())
    }

    /// Counted business hours per working day
    pub fn hours_per_day(&self) -> u32 {
        self.close_hour.min(24).saturating_sub(self.open_hour)
    }

    /// Walk `budget_hours` business hours forward from `from`
    ///
    /// Evaluated in `from`'s own time zone. A zero budget returns `from`.
    pub fn advance<Tz: TimeZone>(&self, from: &DateTime<Tz>, budget_hours: u32) -> DateTime<Tz> {
        let step = Duration::hours(1);
        let mut cursor = from.clone();
        let mut counted = 0;

        // A window with no counted hours would never terminate.
        if self.hours_per_day() == 0 || self.working_days.is_empty() {
            return cursor;
        }

        while counted < budget_hours {
            cursor = cursor + step;
            if self.is_business_hour(&cursor) {
                counted += 1;
            }
        }

        cursor
    }

    /// The desk's local offset
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix())
    }

    /// Walk forward from a UTC instant using the desk's local clock
    pub fn advance_utc(&self, from: DateTime<Utc>, budget_hours: u32) -> DateTime<Utc> {
        let local = from.with_timezone(&self.offset());
        self.advance(&local, budget_hours).with_timezone(&Utc)
    }
}
