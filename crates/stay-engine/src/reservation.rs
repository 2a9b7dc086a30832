//! Reservation records and the proposals that become them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::DateRange;
use crate::error::{Result, StayError};

/// Label of a bookable room. The set of valid labels is fixed by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(pub u32);

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identity of a committed reservation, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(ReservationId)
            .map_err(|_| StayError::InvalidId(s.to_string()))
    }
}

/// Who is staying. Only the name is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

impl GuestInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Payment state of a stay. The amount is a free-text currency string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub amount_paid: String,
    #[serde(default)]
    pub is_exempted: bool,
}

impl Payment {
    pub fn paid(amount: impl Into<String>) -> Self {
        Self {
            amount_paid: amount.into(),
            is_exempted: false,
        }
    }

    pub fn exempted() -> Self {
        Self {
            amount_paid: String::new(),
            is_exempted: true,
        }
    }

    /// Exemption dominates: an exempted payment never carries an amount.
    pub fn normalized(self) -> Self {
        if self.is_exempted {
            Self::exempted()
        } else {
            self
        }
    }

    /// Amount that counts, empty when exempted regardless of what is stored.
    pub fn effective_amount(&self) -> &str {
        if self.is_exempted {
            ""
        } else {
            &self.amount_paid
        }
    }

    /// Label shown on the day-detail card.
    pub fn display(&self) -> &str {
        if self.is_exempted {
            "EXEMPTED"
        } else if self.amount_paid.is_empty() {
            "$0.00"
        } else {
            &self.amount_paid
        }
    }
}

/// A stay that has not been committed yet: the input to book and modify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedStay {
    pub room: RoomNumber,
    #[serde(flatten)]
    pub guest: GuestInfo,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(flatten)]
    pub payment: Payment,
}

impl ProposedStay {
    /// Blank draft for a day clicked on the calendar: both dates default to it.
    pub fn for_day(room: RoomNumber, day: NaiveDate) -> Self {
        Self {
            room,
            guest: GuestInfo::default(),
            check_in: day,
            check_out: day,
            payment: Payment::default(),
        }
    }

    /// # Errors
    /// Returns `StayError::RangeInvalid` when check-out precedes check-in.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.check_in, self.check_out)
    }
}

/// A committed stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub room: RoomNumber,
    #[serde(flatten)]
    pub guest: GuestInfo,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(flatten)]
    pub payment: Payment,
}

impl Reservation {
    /// Bind a proposal to an identity. The payment is normalized so an
    /// exempted stay never stores an amount.
    pub fn from_stay(id: ReservationId, stay: ProposedStay) -> Self {
        Self {
            id,
            room: stay.room,
            guest: stay.guest,
            check_in: stay.check_in,
            check_out: stay.check_out,
            payment: stay.payment.normalized(),
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.check_in,
            end: self.check_out,
        }
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        self.range().contains(day)
    }

    /// The editable fields of this reservation, e.g. to prefill a modify form.
    pub fn to_stay(&self) -> ProposedStay {
        ProposedStay {
            room: self.room,
            guest: self.guest.clone(),
            check_in: self.check_in,
            check_out: self.check_out,
            payment: self.payment.clone(),
        }
    }
}
