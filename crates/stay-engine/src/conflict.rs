//! Decide whether a proposed stay may be committed.
//!
//! Ranges are closed on both ends. Two stays in the same room overlap when
//! `a.check_in <= b.check_out && a.check_out >= b.check_in`, so a check-out
//! day equal to another stay's check-in day IS a conflict: the room cannot be
//! turned over on the same day. Stays in different rooms never conflict.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::date::DateRange;
use crate::error::{Result, StayError};
use crate::reservation::{Reservation, ReservationId, RoomNumber};
use crate::store::ReservationStore;

/// An existing reservation that blocks a proposed range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub existing: Reservation,
    /// Days shared by the proposal and the existing stay, both ends counted.
    pub overlap_days: i64,
}

/// Find every reservation in `room` whose range intersects `[check_in, check_out]`.
///
/// `exclude` removes one reservation from consideration, so a stay being
/// edited never conflicts with its own previous version. Results are sorted by
/// the existing stay's check-in date.
///
/// # Errors
/// Returns `StayError::RangeInvalid` when `check_out < check_in`, regardless of
/// the room's occupancy.
pub fn find_conflicts(
    store: &ReservationStore,
    room: RoomNumber,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<ReservationId>,
) -> Result<Vec<Conflict>> {
    let candidate = DateRange::new(check_in, check_out)?;

    let mut conflicts: Vec<Conflict> = store
        .list_by_room(room)
        .filter(|existing| Some(existing.id) != exclude)
        .filter(|existing| candidate.overlaps(&existing.range()))
        .map(|existing| {
            let overlap_start = candidate.start.max(existing.check_in);
            let overlap_end = candidate.end.min(existing.check_out);
            Conflict {
                existing: existing.clone(),
                overlap_days: (overlap_end - overlap_start).num_days() + 1,
            }
        })
        .collect();

    conflicts.sort_by_key(|c| (c.existing.check_in, c.existing.id));
    Ok(conflicts)
}

/// Gate a create or update: `Ok(())` means the stay may be committed.
///
/// Pass `exclude = None` when creating and `Some(id)` of the record itself
/// when updating it.
///
/// # Errors
/// - `StayError::RangeInvalid` when `check_out < check_in`.
/// - `StayError::RoomConflict` naming the room and the dates of the earliest
///   blocking stay.
pub fn can_commit(
    store: &ReservationStore,
    room: RoomNumber,
    check_in: NaiveDate,
    check_out: NaiveDate,
    exclude: Option<ReservationId>,
) -> Result<()> {
    let conflicts = find_conflicts(store, room, check_in, check_out, exclude).map_err(|e| {
        warn!(%room, %check_in, %check_out, "Rejected stay with reversed range");
        e
    })?;

    match conflicts.first() {
        Some(conflict) => {
            warn!(
                %room,
                %check_in,
                %check_out,
                blocking = %conflict.existing.id,
                "Rejected stay overlapping an existing reservation"
            );
            Err(StayError::RoomConflict {
                room,
                check_in: conflict.existing.check_in,
                check_out: conflict.existing.check_out,
            })
        }
        None => {
            debug!(%room, %check_in, %check_out, "Stay approved");
            Ok(())
        }
    }
}
