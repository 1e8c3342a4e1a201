//! Resolving bulletin day/hour fields to calendar times.
//!
//! Bulletins only carry day-of-month and hour, so an anchoring year and
//! month must be supplied. Days earlier than the validity start day belong
//! to the following month, and hour 24 means midnight at the end of the day.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::{fmt, str::FromStr};

use crate::error::TafError;
use crate::model::{DayTime, ValidityWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueMonth {
    year: i32,
    month: u32,
}

impl IssueMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    fn following(&self) -> (i32, u32) {
        if self.month == 12 { (self.year + 1, 1) } else { (self.year, self.month + 1) }
    }

    /// Resolve `at` relative to a bulletin whose validity starts on `start_day`.
    pub fn resolve(&self, start_day: u8, at: DayTime) -> Option<NaiveDateTime> {
        if at.hour > 24 {
            return None;
        }
        let (year, month) =
            if at.day < start_day { self.following() } else { (self.year, self.month) };

        let midnight = NaiveDate::from_ymd_opt(year, month, u32::from(at.day))?
            .and_hms_opt(0, u32::from(at.minute), 0)?;
        midnight.checked_add_signed(Duration::hours(i64::from(at.hour)))
    }

    /// Start and end of a known validity window.
    pub fn validity(&self, window: &ValidityWindow) -> Option<(NaiveDateTime, NaiveDateTime)> {
        if !window.is_known() {
            return None;
        }
        let start = DayTime { day: window.start_day, hour: window.start_hour, minute: 0 };
        let end = DayTime { day: window.end_day, hour: window.end_hour, minute: 0 };
        Some((self.resolve(window.start_day, start)?, self.resolve(window.start_day, end)?))
    }
}

impl FromStr for IssueMonth {
    type Err = TafError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or_else(|| TafError::InvalidMonth(s.into()))?;
        let year = year.parse().map_err(|_| TafError::InvalidMonth(s.into()))?;
        let month = month.parse().map_err(|_| TafError::InvalidMonth(s.into()))?;

        Self::new(year, month).ok_or_else(|| TafError::InvalidMonth(s.into()))
    }
}

impl fmt::Display for IssueMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
