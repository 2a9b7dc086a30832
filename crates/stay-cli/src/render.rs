//! Plain-text rendering of grids, day details and reservation lists.

use chrono::{Datelike, NaiveDate};
use stay_engine::{DayCell, MonthGrid, Reservation, RoomStatus};

/// Width of one day column, label included.
const CELL: usize = 5;

/// Render a month as a text grid.
///
/// Days of the month are right-aligned numbers; today is wrapped in brackets
/// and an occupied day is followed by its number of occupied rooms. Filler
/// days from adjacent months are left blank.
pub fn month(grid: &MonthGrid) -> String {
    let mut out = format!("{:^width$}\n", grid.title, width = CELL * 7);

    let header: String = grid
        .weekday_labels
        .iter()
        .map(|label| format!("{:>w$} ", label, w = CELL - 1))
        .collect();
    out.push_str(&header);
    out.push('\n');

    for week in grid.weeks() {
        let row: String = week.iter().map(day_cell).collect();
        out.push_str(&row);
        out.push('\n');
    }
    out
}

fn day_cell(cell: &DayCell) -> String {
    if !cell.is_current_month {
        return " ".repeat(CELL);
    }
    let day = cell.date.day();
    let number = if cell.is_today {
        format!("[{:>2}]", day)
    } else {
        format!(" {:>2} ", day)
    };
    let marker = if cell.is_highlighted() {
        char::from_digit(cell.occupants.len().min(9) as u32, 10).unwrap_or('*')
    } else {
        ' '
    };
    format!("{}{}", number, marker)
}

/// Render the per-room status of one day.
pub fn day(date: NaiveDate, statuses: &[RoomStatus]) -> String {
    let mut out = format!("{}\n", date.format("%A, %B %-d, %Y"));
    for status in statuses {
        let line = match &status.occupant {
            Some(r) => format!("Room {}: {}\n", status.room, reservation_line(r)),
            None => format!("Room {}: vacant\n", status.room),
        };
        out.push_str(&line);
    }
    out
}

/// One reservation per line, sorted by check-in then room.
pub fn list(reservations: &[Reservation]) -> String {
    let mut sorted: Vec<&Reservation> = reservations.iter().collect();
    sorted.sort_by_key(|r| (r.check_in, r.room, r.id));

    sorted
        .into_iter()
        .map(|r| format!("Room {}: {}\n", r.room, reservation_line(r)))
        .collect()
}

fn reservation_line(r: &Reservation) -> String {
    let mut line = format!(
        "{} {} -> {} [{}] (#{})",
        r.guest.name,
        r.check_in,
        r.check_out,
        r.payment.display(),
        r.id
    );
    if !r.guest.phone.is_empty() {
        line.push_str(&format!(" tel {}", r.guest.phone));
    }
    if !r.guest.address.is_empty() {
        line.push_str(&format!(" at {}", r.guest.address));
    }
    line
}
