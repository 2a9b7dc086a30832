//! Which reservations touch a given day.
//!
//! Comparison is by calendar date only. `NaiveDate` carries no time of day, so
//! two values on the same date are always equal.

use chrono::NaiveDate;
use serde::Serialize;

use crate::reservation::{Reservation, RoomNumber};
use crate::store::ReservationStore;

/// Every reservation, across all rooms, whose inclusive range contains `day`,
/// ordered by room number.
pub fn occupants_on_day(store: &ReservationStore, day: NaiveDate) -> Vec<Reservation> {
    let mut occupants: Vec<Reservation> = store.iter().filter(|r| r.covers(day)).cloned().collect();
    occupants.sort_by_key(|r| (r.room, r.check_in, r.id));
    occupants
}

/// Occupied/vacant state of one room on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStatus {
    pub room: RoomNumber,
    /// `None` when the room is vacant.
    pub occupant: Option<Reservation>,
}

impl RoomStatus {
    pub fn is_vacant(&self) -> bool {
        self.occupant.is_none()
    }
}

/// One status per room in `rooms`, in room order.
pub fn room_statuses_on_day<'a>(
    rooms: impl IntoIterator<Item = &'a RoomNumber>,
    store: &ReservationStore,
    day: NaiveDate,
) -> Vec<RoomStatus> {
    let occupants = occupants_on_day(store, day);

    let mut statuses: Vec<RoomStatus> = rooms
        .into_iter()
        .map(|&room| RoomStatus {
            room,
            occupant: occupants.iter().find(|r| r.room == room).cloned(),
        })
        .collect();
    statuses.sort_by_key(|s| s.room);
    statuses
}
