//! Engine configuration: the room domain, seed users and calendar settings.
//!
//! Configuration is JSON. Every field is optional and falls back to the
//! defaults of a three-room holiday home with a single `admin/admin`
//! administrator, four months on screen and weeks starting on Sunday.
//!
//! ```json
//! {
//!   "rooms": [1, 2, 3],
//!   "users": [{ "id": 1, "username": "admin", "password": "admin", "is_admin": true }],
//!   "months_displayed": 4,
//!   "week_start": "Sun"
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::auth::{User, UserId};
use crate::error::{Result, StayError};
use crate::reservation::{Reservation, RoomNumber};

/// The fixed, finite set of bookable rooms, kept sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RoomNumber>", into = "Vec<RoomNumber>")]
pub struct RoomSet(BTreeSet<RoomNumber>);

impl RoomSet {
    /// # Errors
    /// Returns `StayError::Config` for an empty list or a repeated room.
    pub fn new(rooms: impl IntoIterator<Item = RoomNumber>) -> Result<Self> {
        let mut set = BTreeSet::new();
        for room in rooms {
            if !set.insert(room) {
                return Err(StayError::Config(format!("room {} listed twice", room)));
            }
        }
        if set.is_empty() {
            return Err(StayError::Config("at least one room is required".to_string()));
        }
        Ok(Self(set))
    }

    pub fn contains(&self, room: RoomNumber) -> bool {
        self.0.contains(&room)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomNumber> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RoomSet {
    fn default() -> Self {
        Self((1..=3).map(RoomNumber).collect())
    }
}

impl TryFrom<Vec<RoomNumber>> for RoomSet {
    type Error = StayError;

    fn try_from(rooms: Vec<RoomNumber>) -> Result<Self> {
        Self::new(rooms)
    }
}

impl From<RoomSet> for Vec<RoomNumber> {
    fn from(rooms: RoomSet) -> Self {
        rooms.0.into_iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub rooms: RoomSet,
    #[serde(default = "default_users")]
    pub users: Vec<User>,
    /// Reservations present when the desk starts.
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default = "default_months_displayed")]
    pub months_displayed: u32,
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

fn default_users() -> Vec<User> {
    vec![User {
        id: UserId(1),
        username: "admin".to_string(),
        password: "admin".to_string(),
        is_admin: true,
    }]
}

fn default_months_displayed() -> u32 {
    4
}

fn default_week_start() -> Weekday {
    Weekday::Sun
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rooms: RoomSet::default(),
            users: default_users(),
            reservations: Vec::new(),
            months_displayed: default_months_displayed(),
            week_start: default_week_start(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    /// Returns `StayError::Config` for malformed JSON or a failed check in
    /// [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| StayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    ///
    /// # Errors
    /// Returns `StayError::Config` if the file cannot be read or is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StayError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// # Errors
    /// Returns `StayError::Config` when no administrator is configured, when
    /// `months_displayed` is zero, or when a seeded reservation names a room
    /// outside `rooms`.
    pub fn validate(&self) -> Result<()> {
        if !self.users.iter().any(|u| u.is_admin) {
            return Err(StayError::Config(
                "at least one administrator is required".to_string(),
            ));
        }
        if self.months_displayed == 0 {
            return Err(StayError::Config(
                "months_displayed must be at least 1".to_string(),
            ));
        }
        if let Some(r) = self.reservations.iter().find(|r| !self.rooms.contains(r.room)) {
            return Err(StayError::Config(format!(
                "reservation {} uses unknown room {}",
                r.id, r.room
            )));
        }
        Ok(())
    }
}
