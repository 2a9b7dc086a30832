//! WASM bindings for stay-engine.
//!
//! Exposes conflict checks, occupancy queries, month grids and gated actions to
//! a JavaScript calendar front end via `wasm-bindgen`. All complex types are
//! passed as JSON strings; dates are ISO `YYYY-MM-DD` strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/pkg/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

pub mod bridge;

use wasm_bindgen::prelude::*;

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Check whether a stay may be committed.
///
/// `config_json` supplies the room set (empty for the default rooms) and
/// `reservations_json` is a JSON array of reservation records. `exclude_id` is
/// the identity of the reservation being edited, if any. Returns
/// `{"ok":true}` or `{"ok":false,"rejection":{"kind":..,"detail":..}}`.
#[wasm_bindgen(js_name = "canCommit")]
pub fn can_commit(
    config_json: &str,
    reservations_json: &str,
    room: u32,
    check_in: &str,
    check_out: &str,
    exclude_id: Option<String>,
) -> Result<String, JsValue> {
    bridge::can_commit(
        config_json,
        reservations_json,
        room,
        check_in,
        check_out,
        exclude_id.as_deref(),
    )
    .map_err(js_err)
}

/// Reservations covering `day`, as a JSON array ordered by room.
#[wasm_bindgen(js_name = "occupantsOnDay")]
pub fn occupants_on_day(reservations_json: &str, day: &str) -> Result<String, JsValue> {
    bridge::occupants_on_day(reservations_json, day).map_err(js_err)
}

/// Per-room status for the day-detail dialog.
///
/// Pass an empty `config_json` for the default three rooms.
#[wasm_bindgen(js_name = "dayDetail")]
pub fn day_detail(config_json: &str, snapshot_json: &str, day: &str) -> Result<String, JsValue> {
    bridge::day_detail(config_json, snapshot_json, day).map_err(js_err)
}

/// A whole-week month grid with per-day occupants and today marking.
#[wasm_bindgen(js_name = "monthGrid")]
pub fn month_grid(
    reservations_json: &str,
    year: i32,
    month: u32,
    week_start: &str,
    today: &str,
) -> Result<String, JsValue> {
    bridge::month_grid(reservations_json, year, month, week_start, today).map_err(js_err)
}

/// Authenticate and run a pending action against a snapshot.
///
/// Returns `{snapshot, outcome?, rejection?}`; the host stores the returned
/// snapshot.
#[wasm_bindgen(js_name = "executeAction")]
pub fn execute_action(
    config_json: &str,
    snapshot_json: &str,
    action_json: &str,
    username: &str,
    password: &str,
) -> Result<String, JsValue> {
    bridge::execute_action(config_json, snapshot_json, action_json, username, password)
        .map_err(js_err)
}
