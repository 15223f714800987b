//! Gregorian calendar rules
//!
//! Date-of-birth input arrives as three separate integers (day, month, year),
//! so the bounds are checked here before anything is turned into a
//! `chrono::NaiveDate`.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    #[error("Invalid day {day} for month {month} of {year}")]
    InvalidDay { day: u32, month: u32, year: i32 },

    #[error("Year {0} is out of range")]
    YearOutOfRange(i32),
}

/// Returns true for Gregorian leap years
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`, or `None` when the month is not 1-12
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// The current year in UTC
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// A checked day/month/year triple
///
/// Construction guarantees the day fits the month, so conversion to
/// `NaiveDate` cannot fail for years chrono supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    day: u32,
    month: u32,
    year: i32,
}

impl CalendarDate {
    /// Creates a date, rejecting out-of-range months and days
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, CalendarError> {
        let max_day = days_in_month(month, year).ok_or(CalendarError::InvalidMonth(month))?;
        if day == 0 || day > max_day {
            return Err(CalendarError::InvalidDay { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Converts to a chrono date
    pub fn to_naive_date(&self) -> Result<NaiveDate, CalendarError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or(CalendarError::YearOutOfRange(self.year))
    }

    /// Returns true if the date lies after today (UTC)
    pub fn is_future(&self) -> bool {
        let today = Utc::now().date_naive();
        match self.to_naive_date() {
            Ok(date) => date > today,
            Err(_) => self.year > today.year(),
        }
    }
}

impl fmt::Display for CalendarDate {
    /// Formats as `d/m/yyyy`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}
