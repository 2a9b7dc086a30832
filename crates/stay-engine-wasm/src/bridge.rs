//! JSON-in/JSON-out wrappers around stay-engine.
//!
//! Kept free of `wasm-bindgen` types so they run (and are tested) on native
//! targets. Input errors (malformed JSON, bad dates) come back as `Err(String)`;
//! business rejections are part of the successful JSON payload.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use stay_engine::{
    parse_iso_date, ActionOutcome, BookingDesk, Credentials, EngineConfig, ExecuteError,
    PendingAction, Reservation, ReservationId, ReservationStore, RoomNumber, Snapshot, StayError,
};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Structured rejection: `kind` is a stable code, `detail` the message.
#[derive(Serialize)]
pub struct RejectionDto {
    pub kind: &'static str,
    pub detail: String,
}

impl From<&StayError> for RejectionDto {
    fn from(e: &StayError) -> Self {
        Self {
            kind: e.kind(),
            detail: e.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CheckDto {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<RejectionDto>,
}

#[derive(Serialize)]
struct ExecuteDto {
    /// State after the action; unchanged when it was rejected.
    snapshot: Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<ActionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<RejectionDto>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_iso_date(s).map_err(|e| e.to_string())
}

fn parse_store(reservations_json: &str) -> Result<ReservationStore, String> {
    let reservations: Vec<Reservation> = serde_json::from_str(reservations_json)
        .map_err(|e| format!("Invalid reservations JSON: {}", e))?;
    ReservationStore::from_reservations(reservations).map_err(|e| e.to_string())
}

/// An empty string selects the default configuration.
fn parse_config(config_json: &str) -> Result<EngineConfig, String> {
    if config_json.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    EngineConfig::from_json_str(config_json).map_err(|e| e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Whether a stay in `room` from `check_in` to `check_out` may be committed.
///
/// Rooms outside the configured set are rejected as `unknown_room` before any
/// date check. Pass an empty `config_json` for the default three rooms.
pub fn can_commit(
    config_json: &str,
    reservations_json: &str,
    room: u32,
    check_in: &str,
    check_out: &str,
    exclude_id: Option<&str>,
) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let store = parse_store(reservations_json)?;
    let exclude = exclude_id
        .map(|id| id.parse::<ReservationId>())
        .transpose()
        .map_err(|e| e.to_string())?;
    let check_in = parse_date(check_in)?;
    let check_out = parse_date(check_out)?;

    let room = RoomNumber(room);
    let result = if config.rooms.contains(room) {
        stay_engine::can_commit(&store, room, check_in, check_out, exclude)
    } else {
        Err(StayError::UnknownRoom(room))
    };

    to_json(&CheckDto {
        ok: result.is_ok(),
        rejection: result.err().as_ref().map(RejectionDto::from),
    })
}

/// Reservations covering `day`, ordered by room.
pub fn occupants_on_day(reservations_json: &str, day: &str) -> Result<String, String> {
    let store = parse_store(reservations_json)?;
    to_json(&stay_engine::occupants_on_day(&store, parse_date(day)?))
}

/// One occupied/vacant entry per configured room.
pub fn day_detail(config_json: &str, snapshot_json: &str, day: &str) -> Result<String, String> {
    let desk = load_desk(config_json, snapshot_json)?;
    to_json(&desk.day_detail(parse_date(day)?))
}

/// A whole-week month grid. `week_start` is a weekday name such as "Sun".
pub fn month_grid(
    reservations_json: &str,
    year: i32,
    month: u32,
    week_start: &str,
    today: &str,
) -> Result<String, String> {
    let store = parse_store(reservations_json)?;
    let week_start: Weekday = week_start
        .parse()
        .map_err(|_| format!("Invalid weekday: '{}'", week_start))?;

    let grid = stay_engine::month_grid(year, month, week_start, parse_date(today)?, &store)
        .map_err(|e| e.to_string())?;
    to_json(&grid)
}

/// Run a gated action against a snapshot and return the resulting snapshot.
///
/// `action_json` is a [`PendingAction`], e.g.
/// `{"action":"delete","params":3}`.
pub fn execute_action(
    config_json: &str,
    snapshot_json: &str,
    action_json: &str,
    username: &str,
    password: &str,
) -> Result<String, String> {
    let mut desk = load_desk(config_json, snapshot_json)?;
    let pending: PendingAction =
        serde_json::from_str(action_json).map_err(|e| format!("Invalid action JSON: {}", e))?;

    let (outcome, rejection) = match desk.execute(pending, &Credentials::new(username, password)) {
        Ok(outcome) => (Some(outcome), None),
        Err(ExecuteError::Rejected(gate)) => (None, Some(RejectionDto::from(&gate.error))),
        Err(ExecuteError::Failed(e)) => (None, Some(RejectionDto::from(&e))),
    };

    to_json(&ExecuteDto {
        snapshot: desk.snapshot(),
        outcome,
        rejection,
    })
}

fn load_desk(config_json: &str, snapshot_json: &str) -> Result<BookingDesk, String> {
    let config = parse_config(config_json)?;
    let snapshot: Snapshot = if snapshot_json.trim().is_empty() {
        Snapshot {
            reservations: config.reservations.clone(),
            users: config.users.clone(),
        }
    } else {
        serde_json::from_str(snapshot_json).map_err(|e| format!("Invalid snapshot JSON: {}", e))?
    };
    BookingDesk::with_snapshot(config, snapshot).map_err(|e| e.to_string())
}
