//! In-memory reservation store with identity-keyed mutation.
//!
//! The store holds the current set of reservations and nothing else. It does
//! not enforce the no-overlap rule: callers run [`crate::conflict::can_commit`]
//! before `add`/`update`, and [`crate::desk::BookingDesk`] does so for them.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::{Result, StayError};
use crate::reservation::{ProposedStay, Reservation, ReservationId, RoomNumber};

/// Ordered collection of committed reservations.
///
/// Identities come from a counter owned by the store, so they are unique for
/// the store's lifetime and deterministic for a given sequence of calls.
#[derive(Debug, Clone)]
pub struct ReservationStore {
    reservations: Vec<Reservation>,
    next_id: u64,
}

impl Default for ReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationStore {
    pub fn new() -> Self {
        Self {
            reservations: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed a store from previously committed records (a snapshot or fixture).
    ///
    /// Payments are normalized and the identity counter resumes past the
    /// largest seeded identity.
    ///
    /// # Errors
    /// Returns `StayError::RangeInvalid` for a record whose check-out precedes
    /// its check-in, and `StayError::InvalidId` for a repeated identity or one
    /// with no successor (`u64::MAX`).
    pub fn from_reservations(reservations: Vec<Reservation>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut next_id = 1;
        let mut normalized = Vec::with_capacity(reservations.len());

        for mut reservation in reservations {
            if reservation.check_out < reservation.check_in {
                return Err(StayError::RangeInvalid {
                    check_in: reservation.check_in,
                    check_out: reservation.check_out,
                });
            }
            if !seen.insert(reservation.id) {
                return Err(StayError::InvalidId(format!(
                    "duplicate reservation id {}",
                    reservation.id
                )));
            }
            let successor = reservation.id.0.checked_add(1).ok_or_else(|| {
                StayError::InvalidId(format!("reservation id {} is out of range", reservation.id))
            })?;
            next_id = next_id.max(successor);
            reservation.payment = reservation.payment.normalized();
            normalized.push(reservation);
        }

        Ok(Self {
            reservations: normalized,
            next_id,
        })
    }

    /// Assign a fresh identity and append. Never fails.
    pub fn add(&mut self, candidate: ProposedStay) -> Reservation {
        let id = self.fresh_id();

        let reservation = Reservation::from_stay(id, candidate);
        self.reservations.push(reservation.clone());
        info!(%id, room = %reservation.room, size = self.reservations.len(), "Reservation added");
        reservation
    }

    /// Identities count up from the largest one seen. Once the counter passes
    /// `u64::MAX` it restarts at 1 and skips identities still in use.
    fn fresh_id(&mut self) -> ReservationId {
        let mut candidate = self.next_id;
        while self.get(ReservationId(candidate)).is_some() {
            candidate = candidate.checked_add(1).unwrap_or(1);
        }
        self.next_id = candidate.checked_add(1).unwrap_or(1);
        ReservationId(candidate)
    }

    /// Replace every field except the identity.
    ///
    /// # Errors
    /// Returns `StayError::NotFound` if no reservation has this identity.
    pub fn update(&mut self, id: ReservationId, fields: ProposedStay) -> Result<Reservation> {
        let slot = self
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StayError::NotFound(format!("reservation {}", id)))?;

        *slot = Reservation::from_stay(id, fields);
        info!(%id, room = %slot.room, "Reservation updated");
        Ok(slot.clone())
    }

    /// Delete by identity. Removing an absent identity is a no-op.
    pub fn remove(&mut self, id: ReservationId) -> Option<Reservation> {
        let index = self.reservations.iter().position(|r| r.id == id);
        match index {
            Some(index) => {
                let removed = self.reservations.remove(index);
                info!(%id, size = self.reservations.len(), "Reservation removed");
                Some(removed)
            }
            None => {
                debug!(%id, "Remove of absent reservation ignored");
                None
            }
        }
    }

    pub fn get(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// All reservations for one room. Order carries no meaning.
    pub fn list_by_room(&self, room: RoomNumber) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.room == room)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter()
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Owned copy of every record, in insertion order.
    pub fn snapshot(&self) -> Vec<Reservation> {
        self.reservations.clone()
    }
}
