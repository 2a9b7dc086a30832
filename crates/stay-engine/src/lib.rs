//! # stay-engine
//!
//! Reservation conflict and occupancy engine for a small holiday home.
//!
//! A fixed set of rooms is booked by the whole calendar day. The engine is the
//! single authority on whether a proposed stay may be committed (no two stays
//! in one room may share a day, check-out day included) and on which stays
//! touch a given day, which drives calendar highlighting.
//!
//! ## Modules
//!
//! - [`date`] — ISO `YYYY-MM-DD` parsing/formatting and inclusive date ranges
//! - [`reservation`] — Reservation records, proposals, payment/exemption rules
//! - [`store`] — In-memory reservation store with identity-keyed mutation
//! - [`conflict`] — Range validation and same-room overlap detection
//! - [`occupancy`] — Reservations covering a day, per-room vacancy
//! - [`calendar`] — Whole-week month grids and month navigation
//! - [`auth`] — User directory and the credential predicate
//! - [`gateway`] — Pending actions and privilege checks
//! - [`desk`] — The state object tying it all together
//! - [`config`] — JSON configuration
//! - [`error`] — Error types

pub mod auth;
pub mod calendar;
pub mod config;
pub mod conflict;
pub mod date;
pub mod desk;
pub mod error;
pub mod gateway;
pub mod occupancy;
pub mod reservation;
pub mod store;

pub use auth::{Authenticator, Credentials, User, UserDirectory, UserId};
pub use calendar::{month_grid, DayCell, MonthCursor, MonthGrid};
pub use config::{EngineConfig, RoomSet};
pub use conflict::{can_commit, find_conflicts};
pub use date::{format_iso_date, parse_iso_date, DateRange};
pub use desk::{BookingDesk, Snapshot};
pub use error::StayError;
pub use gateway::{ActionOutcome, ExecuteError, PendingAction, Privilege};
pub use occupancy::{occupants_on_day, RoomStatus};
pub use reservation::{GuestInfo, Payment, ProposedStay, Reservation, ReservationId, RoomNumber};
pub use store::ReservationStore;
