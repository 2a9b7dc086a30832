//! Access-gated mutations.
//!
//! Every mutation is captured as a [`PendingAction`] value before credentials
//! are checked. A pending action is consumed when it runs, so it runs at most
//! once; dropping it (or calling [`PendingAction::cancel`]) discards it with no
//! side effects.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::{Authenticator, Credentials, NewUser, User, UserId};
use crate::error::{Result, StayError};
use crate::reservation::{ProposedStay, Reservation, ReservationId};

/// Privilege a pending action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privilege {
    /// Any user in the directory.
    AnyUser,
    /// A user with the administrator flag.
    Administrator,
}

/// A captured mutation awaiting credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum PendingAction {
    Book(ProposedStay),
    Modify { id: ReservationId, stay: ProposedStay },
    Delete(ReservationId),
    CreateUser(NewUser),
    DeleteUser(UserId),
}

impl PendingAction {
    pub fn required_privilege(&self) -> Privilege {
        match self {
            PendingAction::Book(_) | PendingAction::Modify { .. } | PendingAction::Delete(_) => {
                Privilege::AnyUser
            }
            PendingAction::CreateUser(_) | PendingAction::DeleteUser(_) => {
                Privilege::Administrator
            }
        }
    }

    /// Discard without running.
    pub fn cancel(self) {
        debug!(action = self.kind(), "Pending action cancelled");
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            PendingAction::Book(_) => "book",
            PendingAction::Modify { .. } => "modify",
            PendingAction::Delete(_) => "delete",
            PendingAction::CreateUser(_) => "create_user",
            PendingAction::DeleteUser(_) => "delete_user",
        }
    }
}

/// A pending action returned unexecuted because the credentials were refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct GateRejection {
    /// `AuthenticationFailed` or `AuthorizationInsufficient`.
    pub error: StayError,
    /// The untouched action, to retry with other credentials or cancel.
    pub pending: PendingAction,
}

/// What a pending action did once it ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum ActionOutcome {
    Booked(Reservation),
    Modified(Reservation),
    /// `None` when the reservation was already gone.
    Deleted(Option<Reservation>),
    UserCreated(User),
    UserDeleted(User),
}

/// Failure of [`crate::desk::BookingDesk::execute`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    /// Credentials refused; the action did not run and is handed back.
    #[error(transparent)]
    Rejected(#[from] GateRejection),
    /// The action ran and was rejected by validation. Nothing was mutated.
    #[error(transparent)]
    Failed(#[from] StayError),
}

/// Check `credentials` against `privilege`.
///
/// "No such user/password" and "valid user without the administrator flag"
/// are distinct errors so callers can present a clearer message.
///
/// # Errors
/// - `StayError::AuthenticationFailed` when no user matches.
/// - `StayError::AuthorizationInsufficient` when the match is not an
///   administrator and `privilege` is `Administrator`.
pub fn verify<'a, A>(
    authenticator: &'a A,
    credentials: &Credentials,
    privilege: Privilege,
) -> Result<&'a User>
where
    A: Authenticator + ?Sized,
{
    let user = authenticator
        .authenticate(&credentials.username, &credentials.password, false)
        .ok_or_else(|| {
            warn!(username = %credentials.username, "Authentication failed");
            StayError::AuthenticationFailed
        })?;

    if privilege == Privilege::Administrator
        && authenticator
            .authenticate(&credentials.username, &credentials.password, true)
            .is_none()
    {
        warn!(username = %credentials.username, "Administrator privileges required");
        return Err(StayError::AuthorizationInsufficient);
    }

    Ok(user)
}
