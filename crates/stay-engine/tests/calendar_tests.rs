//! Tests for month grids: whole-week spans, filler days, today marking,
//! occupancy highlighting and month navigation.

use chrono::{NaiveDate, Weekday};
use stay_engine::calendar::{display_months, month_grid, weekday_labels, MonthCursor};
use stay_engine::{GuestInfo, Payment, ProposedStay, ReservationStore, RoomNumber, StayError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    stay_engine::parse_iso_date(s).unwrap()
}

fn stay(room: u32, check_in: &str, check_out: &str) -> ProposedStay {
    ProposedStay {
        room: RoomNumber(room),
        guest: GuestInfo::named("Guest"),
        check_in: d(check_in),
        check_out: d(check_out),
        payment: Payment::default(),
    }
}

fn far_away_today() -> NaiveDate {
    d("1999-01-01")
}

// ── Grid shape ──────────────────────────────────────────────────────────────

#[test]
fn february_starting_on_sunday_fills_exactly_four_weeks() {
    // 2015-02-01 is a Sunday and February 2015 has 28 days.
    let store = ReservationStore::new();
    let grid = month_grid(2015, 2, Weekday::Sun, far_away_today(), &store).unwrap();

    assert_eq!(grid.days.len(), 28);
    assert!(grid.days.iter().all(|c| c.is_current_month));
}

#[test]
fn long_month_starting_on_saturday_needs_six_weeks() {
    // 2021-05-01 is a Saturday; May 31 is a Monday.
    let store = ReservationStore::new();
    let grid = month_grid(2021, 5, Weekday::Sun, far_away_today(), &store).unwrap();

    assert_eq!(grid.days.len(), 42);
    assert_eq!(grid.days[0].date, d("2021-04-25"));
    assert_eq!(grid.days[41].date, d("2021-06-05"));
    assert_eq!(grid.days.iter().filter(|c| c.is_current_month).count(), 31);
}

#[test]
fn week_start_changes_leading_and_trailing_fillers() {
    // 2024-06-01 is a Saturday, 2024-06-30 a Sunday.
    let store = ReservationStore::new();

    let sunday = month_grid(2024, 6, Weekday::Sun, far_away_today(), &store).unwrap();
    let monday = month_grid(2024, 6, Weekday::Mon, far_away_today(), &store).unwrap();

    assert_eq!(sunday.days.len(), 42);
    assert_eq!(sunday.days[0].date, d("2024-05-26"));
    assert_eq!(monday.days.len(), 35);
    assert_eq!(monday.days[0].date, d("2024-05-27"));
    assert_eq!(monday.days[34].date, d("2024-06-30"));
}

#[test]
fn every_grid_is_whole_weeks_starting_on_week_start() {
    let store = ReservationStore::new();
    for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Wed] {
        for month in 1..=12 {
            let grid = month_grid(2025, month, week_start, far_away_today(), &store).unwrap();
            assert_eq!(grid.days.len() % 7, 0, "month {} not whole weeks", month);
            assert!((28..=42).contains(&grid.days.len()));
            for week in grid.weeks() {
                assert_eq!(chrono::Datelike::weekday(&week[0].date), week_start);
            }
        }
    }
}

#[test]
fn grid_header_and_labels() {
    let store = ReservationStore::new();
    let grid = month_grid(2024, 6, Weekday::Sun, far_away_today(), &store).unwrap();

    assert_eq!(grid.title, "June 2024");
    assert_eq!(grid.weekday_labels, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    assert_eq!(
        weekday_labels(Weekday::Mon),
        ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
    );
}

#[test]
fn invalid_month_is_rejected() {
    let store = ReservationStore::new();
    let err = month_grid(2024, 13, Weekday::Sun, far_away_today(), &store).unwrap_err();
    assert!(matches!(err, StayError::InvalidDate(_)));
}

// ── Cell classification ─────────────────────────────────────────────────────

#[test]
fn today_is_marked_once() {
    let store = ReservationStore::new();
    let grid = month_grid(2024, 6, Weekday::Sun, d("2024-06-14"), &store).unwrap();

    let todays: Vec<_> = grid.days.iter().filter(|c| c.is_today).collect();
    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].date, d("2024-06-14"));
}

#[test]
fn occupied_days_carry_their_reservations() {
    let mut store = ReservationStore::new();
    store.add(stay(1, "2024-06-01", "2024-06-05"));
    store.add(stay(2, "2024-06-05", "2024-06-05"));

    let grid = month_grid(2024, 6, Weekday::Sun, far_away_today(), &store).unwrap();
    let june_5 = grid.days.iter().find(|c| c.date == d("2024-06-05")).unwrap();
    let june_6 = grid.days.iter().find(|c| c.date == d("2024-06-06")).unwrap();

    assert_eq!(june_5.occupants.len(), 2, "one dot per occupied room");
    assert!(june_5.is_highlighted());
    assert!(!june_6.is_occupied());
    assert_eq!(grid.occupied_days().count(), 5);
}

#[test]
fn filler_days_are_occupied_but_not_highlighted() {
    let mut store = ReservationStore::new();
    store.add(stay(1, "2024-05-26", "2024-05-31"));

    let grid = month_grid(2024, 6, Weekday::Sun, far_away_today(), &store).unwrap();
    let filler = &grid.days[0];

    assert_eq!(filler.date, d("2024-05-26"));
    assert!(!filler.is_current_month);
    assert!(filler.is_occupied());
    assert!(!filler.is_highlighted());
    assert_eq!(grid.occupied_days().count(), 0);
}

// ── Navigation ──────────────────────────────────────────────────────────────

#[test]
fn cursor_wraps_across_years() {
    let december = MonthCursor::new(2024, 12).unwrap();

    let january = december.next().unwrap();
    assert_eq!((january.year(), january.month()), (2025, 1));
    assert_eq!(january.prev().unwrap(), december);
    assert_eq!(december.last_day().unwrap(), d("2024-12-31"));
}

#[test]
fn cursor_from_any_day_starts_on_the_first() {
    let june = MonthCursor::containing(d("2024-06-30"));

    assert_eq!(june.first_day(), d("2024-06-01"));
    assert_eq!(june, MonthCursor::new(2024, 6).unwrap());
    assert_eq!(june.to_string(), "2024-06");
    assert_eq!(MonthCursor::containing(d("2024-06-01")).first_day(), d("2024-06-01"));
}

#[test]
fn display_months_shows_consecutive_months() {
    let store = ReservationStore::new();

    let grids = display_months(d("2024-11-15"), 4, Weekday::Sun, far_away_today(), &store).unwrap();

    let titles: Vec<&str> = grids.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["November 2024", "December 2024", "January 2025", "February 2025"]
    );
}

#[test]
fn leap_february_has_twenty_nine_current_days() {
    let store = ReservationStore::new();
    let grid = month_grid(2024, 2, Weekday::Sun, far_away_today(), &store).unwrap();
    assert_eq!(grid.days.iter().filter(|c| c.is_current_month).count(), 29);
}
