//! The booking desk: the explicit state object a presentation layer holds.
//!
//! A desk owns the room set, the reservation store and the user directory for
//! the lifetime of the process. Every mutating operation takes `&mut self`, so
//! the conflict check and the commit that follows it cannot interleave with
//! another writer. Hosts serving several clients wrap the desk in a single
//! writer lock.

use chrono::{Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{Credentials, User, UserDirectory};
use crate::calendar::{self, MonthCursor, MonthGrid};
use crate::config::{EngineConfig, RoomSet};
use crate::conflict;
use crate::error::{Result, StayError};
use crate::gateway::{self, ActionOutcome, ExecuteError, GateRejection, PendingAction};
use crate::occupancy::{self, RoomStatus};
use crate::reservation::{ProposedStay, Reservation, ReservationId};
use crate::store::ReservationStore;

/// The mutable state of a desk, as exchanged with a host that keeps it
/// between runs (the CLI's state file, a browser's local storage).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone)]
pub struct BookingDesk {
    rooms: RoomSet,
    store: ReservationStore,
    users: UserDirectory,
    months_displayed: u32,
    week_start: Weekday,
    pinned_today: Option<NaiveDate>,
}

impl BookingDesk {
    /// Build a desk seeded from `config`.
    ///
    /// # Errors
    /// Returns `StayError::Config` if the configuration is invalid or its seed
    /// reservations overlap, and any error from seeding the store or users.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot {
            reservations: config.reservations.clone(),
            users: config.users.clone(),
        };
        Self::with_snapshot(config, snapshot)
    }

    /// Build a desk whose reservations and users come from `snapshot` instead
    /// of the configuration seeds. Rooms and calendar settings still come from
    /// `config`.
    ///
    /// # Errors
    /// Returns `StayError::Config` if a snapshot reservation names an unknown
    /// room or two snapshot reservations overlap, and any error from seeding.
    pub fn with_snapshot(config: EngineConfig, snapshot: Snapshot) -> Result<Self> {
        let store = ReservationStore::from_reservations(snapshot.reservations)?;
        let users = UserDirectory::from_users(snapshot.users)?;

        for reservation in store.iter() {
            if !config.rooms.contains(reservation.room) {
                return Err(StayError::Config(format!(
                    "reservation {} uses unknown room {}",
                    reservation.id, reservation.room
                )));
            }
            let clashes = conflict::find_conflicts(
                &store,
                reservation.room,
                reservation.check_in,
                reservation.check_out,
                Some(reservation.id),
            )?;
            if let Some(clash) = clashes.first() {
                return Err(StayError::Config(format!(
                    "reservations {} and {} overlap in room {}",
                    reservation.id, clash.existing.id, reservation.room
                )));
            }
        }

        info!(
            rooms = config.rooms.len(),
            reservations = store.len(),
            users = users.len(),
            "Booking desk ready"
        );

        Ok(Self {
            rooms: config.rooms,
            store,
            users,
            months_displayed: config.months_displayed,
            week_start: config.week_start,
            pinned_today: None,
        })
    }

    /// Fix "today" instead of reading the local clock.
    pub fn pin_today(&mut self, today: NaiveDate) {
        self.pinned_today = Some(today);
    }

    pub fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub fn reservations(&self) -> &ReservationStore {
        &self.store
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            reservations: self.store.snapshot(),
            users: self.users.snapshot(),
        }
    }

    /// Run every check a commit would run, without committing.
    ///
    /// `exclude` is the identity of the reservation being edited, if any.
    ///
    /// # Errors
    /// `UnknownRoom`, `MissingGuestName`, `RangeInvalid` or `RoomConflict`.
    pub fn check(&self, stay: &ProposedStay, exclude: Option<ReservationId>) -> Result<()> {
        if !self.rooms.contains(stay.room) {
            warn!(room = %stay.room, "Rejected stay in unknown room");
            return Err(StayError::UnknownRoom(stay.room));
        }
        if stay.guest.name.trim().is_empty() {
            return Err(StayError::MissingGuestName);
        }
        conflict::can_commit(&self.store, stay.room, stay.check_in, stay.check_out, exclude)
    }

    /// Validate and commit a new reservation.
    ///
    /// # Errors
    /// Any error from [`BookingDesk::check`]; the store is left unchanged.
    pub fn book(&mut self, stay: ProposedStay) -> Result<Reservation> {
        self.check(&stay, None)?;
        Ok(self.store.add(stay))
    }

    /// Replace an existing reservation's fields, keeping its identity.
    ///
    /// The reservation is excluded from its own conflict check.
    ///
    /// # Errors
    /// `NotFound` for an unknown identity, otherwise any error from
    /// [`BookingDesk::check`]; the store is left unchanged.
    pub fn modify(&mut self, id: ReservationId, stay: ProposedStay) -> Result<Reservation> {
        if self.store.get(id).is_none() {
            return Err(StayError::NotFound(format!("reservation {}", id)));
        }
        self.check(&stay, Some(id))?;
        self.store.update(id, stay)
    }

    /// Delete a reservation. Deleting an absent identity is a no-op.
    pub fn cancel_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        self.store.remove(id)
    }

    pub fn occupants_on_day(&self, day: NaiveDate) -> Vec<Reservation> {
        occupancy::occupants_on_day(&self.store, day)
    }

    /// Per-room occupied/vacant state for the day-detail view.
    pub fn day_detail(&self, day: NaiveDate) -> Vec<RoomStatus> {
        occupancy::room_statuses_on_day(self.rooms.iter(), &self.store, day)
    }

    /// # Errors
    /// Returns `StayError::InvalidDate` for a month outside chrono's range.
    pub fn month_grid(&self, month: MonthCursor) -> Result<MonthGrid> {
        calendar::month_grid(
            month.year(),
            month.month(),
            self.week_start,
            self.today(),
            &self.store,
        )
    }

    /// The configured number of consecutive month grids, starting at the
    /// month holding `anchor`.
    ///
    /// # Errors
    /// Returns `StayError::InvalidDate` if the run leaves chrono's range.
    pub fn display_months(&self, anchor: NaiveDate) -> Result<Vec<MonthGrid>> {
        calendar::display_months(
            anchor,
            self.months_displayed,
            self.week_start,
            self.today(),
            &self.store,
        )
    }

    /// Check credentials for `pending` and, if accepted, run it exactly once.
    ///
    /// # Errors
    /// - `ExecuteError::Rejected` when the credentials are refused. The action
    ///   did not run and comes back inside the rejection.
    /// - `ExecuteError::Failed` when the action ran but was rejected by
    ///   validation. Nothing was mutated.
    pub fn execute(
        &mut self,
        pending: PendingAction,
        credentials: &Credentials,
    ) -> std::result::Result<ActionOutcome, ExecuteError> {
        let privilege = pending.required_privilege();
        if let Err(error) = gateway::verify(&self.users, credentials, privilege) {
            return Err(GateRejection { error, pending }.into());
        }

        debug!(action = pending.kind(), username = %credentials.username, "Running gated action");
        let outcome = match pending {
            PendingAction::Book(stay) => ActionOutcome::Booked(self.book(stay)?),
            PendingAction::Modify { id, stay } => ActionOutcome::Modified(self.modify(id, stay)?),
            PendingAction::Delete(id) => ActionOutcome::Deleted(self.cancel_reservation(id)),
            PendingAction::CreateUser(new_user) => {
                ActionOutcome::UserCreated(self.users.add_user(new_user)?)
            }
            PendingAction::DeleteUser(id) => ActionOutcome::UserDeleted(self.users.delete_user(id)?),
        };
        Ok(outcome)
    }
}
