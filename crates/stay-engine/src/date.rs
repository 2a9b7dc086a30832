//! Whole-day calendar dates and inclusive date ranges.
//!
//! Dates cross every boundary as ISO `YYYY-MM-DD` strings with no time-of-day
//! component, so parsing and formatting round-trip exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StayError};

const ISO_DATE: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Only the canonical zero-padded form is accepted. Anything that would not
/// format back to the identical string is rejected.
///
/// # Errors
/// Returns `StayError::InvalidDate` if the string is not a valid ISO date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let date = NaiveDate::parse_from_str(trimmed, ISO_DATE)
        .map_err(|e| StayError::InvalidDate(format!("'{}': {}", s, e)))?;

    // chrono accepts unpadded fields ("2024-6-1"); the canonical form does not.
    if format_iso_date(date) != trimmed {
        return Err(StayError::InvalidDate(format!(
            "'{}': expected YYYY-MM-DD",
            s
        )));
    }
    Ok(date)
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

/// An inclusive range of calendar days. `start == end` is a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`.
    ///
    /// # Errors
    /// Returns `StayError::RangeInvalid` when the end precedes the start.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(StayError::RangeInvalid {
                check_in: start,
                check_out: end,
            });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Closed-interval intersection. Ranges sharing only a boundary day
    /// still overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

