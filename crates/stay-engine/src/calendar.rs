//! Month grids for calendar rendering.
//!
//! A grid always spans complete weeks: from the start of the week holding the
//! 1st through the end of the week holding the last day of the month. That
//! gives 28 to 42 cells depending on month length and week-start alignment.
//! Grids are recomputed from the store on every call.

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::{Result, StayError};
use crate::occupancy::occupants_on_day;
use crate::reservation::Reservation;
use crate::store::ReservationStore;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for leading/trailing filler days from adjacent months.
    pub is_current_month: bool,
    pub is_today: bool,
    /// Reservations covering this day, ordered by room.
    pub occupants: Vec<Reservation>,
}

impl DayCell {
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    /// Occupied days are only painted inside the displayed month.
    pub fn is_highlighted(&self) -> bool {
        self.is_occupied() && self.is_current_month
    }
}

/// A rendered month: a header and whole weeks of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// e.g. "June 2024".
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Cells grouped into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.days.chunks(7)
    }

    pub fn occupied_days(&self) -> impl Iterator<Item = &DayCell> {
        self.days.iter().filter(|d| d.is_highlighted())
    }
}

/// Column headers for a week starting on `week_start`.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    let offset = week_start.num_days_from_monday() as usize;
    std::array::from_fn(|i| WEEKDAY_LABELS[(offset + i) % 7])
}

/// Build the grid for `year`/`month`, marking `today` and per-day occupancy.
///
/// # Errors
/// Returns `StayError::InvalidDate` if `year`/`month` is not a real month.
pub fn month_grid(
    year: i32,
    month: u32,
    week_start: Weekday,
    today: NaiveDate,
    store: &ReservationStore,
) -> Result<MonthGrid> {
    let cursor = MonthCursor::new(year, month)?;
    let first = cursor.first_day();
    let last = cursor.last_day()?;

    let grid_start = first - Days::new(days_into_week(first, week_start));
    let grid_end = last + Days::new(6 - days_into_week(last, week_start));

    let days = grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|date| DayCell {
            date,
            is_current_month: date.year() == year && date.month() == month,
            is_today: date == today,
            occupants: occupants_on_day(store, date),
        })
        .collect();

    Ok(MonthGrid {
        year,
        month,
        title: first.format("%B %Y").to_string(),
        weekday_labels: weekday_labels(week_start),
        days,
    })
}

/// Position of `date` within a week that starts on `week_start`, 0..=6.
fn days_into_week(date: NaiveDate, week_start: Weekday) -> u64 {
    let day = date.weekday().num_days_from_monday();
    let start = week_start.num_days_from_monday();
    u64::from((7 + day - start) % 7)
}

/// A calendar month used for navigation between displayed pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthCursor {
    /// Always the 1st of the month.
    first: NaiveDate,
}

impl MonthCursor {
    /// # Errors
    /// Returns `StayError::InvalidDate` unless `month` is 1..=12 and the year is
    /// representable.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| StayError::InvalidDate(format!("{:04}-{:02}", year, month)))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// The month holding the process's current local date.
    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// # Errors
    /// Returns `StayError::InvalidDate` at the upper end of chrono's range.
    pub fn last_day(&self) -> Result<NaiveDate> {
        self.next()
            .map(|next| next.first_day())
            .and_then(|first| {
                first
                    .pred_opt()
                    .ok_or_else(|| StayError::InvalidDate(first.to_string()))
            })
    }

    /// # Errors
    /// Returns `StayError::InvalidDate` past the end of chrono's range.
    pub fn next(&self) -> Result<Self> {
        self.offset(1)
    }

    /// # Errors
    /// Returns `StayError::InvalidDate` before the start of chrono's range.
    pub fn prev(&self) -> Result<Self> {
        let moved = self
            .first_day()
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| StayError::InvalidDate(format!("month before {}", self)))?;
        Ok(Self::containing(moved))
    }

    fn offset(&self, months: u32) -> Result<Self> {
        let moved = self
            .first_day()
            .checked_add_months(Months::new(months))
            .ok_or_else(|| StayError::InvalidDate(format!("{} + {} months", self, months)))?;
        Ok(Self::containing(moved))
    }

    /// `count` consecutive months starting with this one.
    ///
    /// # Errors
    /// Returns `StayError::InvalidDate` if the run leaves chrono's range.
    pub fn display_months(&self, count: u32) -> Result<Vec<MonthCursor>> {
        (0..count).map(|i| self.offset(i)).collect()
    }
}

impl std::fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Grids for `count` consecutive months starting at the month holding `anchor`.
///
/// # Errors
/// Returns `StayError::InvalidDate` if the run leaves chrono's range.
pub fn display_months(
    anchor: NaiveDate,
    count: u32,
    week_start: Weekday,
    today: NaiveDate,
    store: &ReservationStore,
) -> Result<Vec<MonthGrid>> {
    MonthCursor::containing(anchor)
        .display_months(count)?
        .into_iter()
        .map(|m| month_grid(m.year(), m.month(), week_start, today, store))
        .collect()
}
