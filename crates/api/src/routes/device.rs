//! Route definitions for the `/devices` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{command, device};
use crate::state::AppState;

/// Routes mounted at `/devices`.
///
/// ```text
/// POST /register              -> register_device
/// GET  /                      -> list_devices
/// GET  /{deviceId}            -> get_device
/// GET  /{deviceId}/commands   -> list_commands
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(device::register_device))
        .route("/", get(device::list_devices))
        .route("/{device_id}", get(device::get_device))
        .route("/{device_id}/commands", get(command::list_commands))
}
