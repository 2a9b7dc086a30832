//! Error types for stay-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::reservation::RoomNumber;

/// Every rejection the engine can hand back to a caller.
///
/// None of these are fatal. A rejected operation never leaves the store
/// partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StayError {
    /// Check-out precedes check-in.
    #[error("Invalid range: check-out {check_out} is before check-in {check_in}")]
    RangeInvalid {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// The proposed range intersects an existing stay in the same room.
    /// `check_in`/`check_out` are the dates of the blocking stay.
    #[error("Room {room} is already booked from {check_in} to {check_out}")]
    RoomConflict {
        room: RoomNumber,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Administrator privileges required")]
    AuthorizationInsufficient,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown room: {0}")]
    UnknownRoom(RoomNumber),

    #[error("Guest name is required")]
    MissingGuestName,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("User cannot be deleted: {0}")]
    ProtectedUser(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StayError {
    /// Stable machine-readable name of the variant, for bindings.
    pub fn kind(&self) -> &'static str {
        match self {
            StayError::RangeInvalid { .. } => "range_invalid",
            StayError::RoomConflict { .. } => "room_conflict",
            StayError::AuthenticationFailed => "authentication_failed",
            StayError::AuthorizationInsufficient => "authorization_insufficient",
            StayError::NotFound(_) => "not_found",
            StayError::UnknownRoom(_) => "unknown_room",
            StayError::MissingGuestName => "missing_guest_name",
            StayError::InvalidDate(_) => "invalid_date",
            StayError::InvalidId(_) => "invalid_id",
            StayError::InvalidUser(_) => "invalid_user",
            StayError::DuplicateUsername(_) => "duplicate_username",
            StayError::ProtectedUser(_) => "protected_user",
            StayError::Config(_) => "config",
        }
    }

    /// True for the two credential rejections, after which a gated action is
    /// handed back to the caller unexecuted.
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            StayError::AuthenticationFailed | StayError::AuthorizationInsufficient
        )
    }
}

pub type Result<T> = std::result::Result<T, StayError>;
