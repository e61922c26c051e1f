//! Route definitions for the `/commands` resource.
//!
//! All endpoints require authentication.

use axum::routing::post;
use axum::Router;

use crate::handlers::command;
use crate::state::AppState;

/// Routes mounted at `/commands`.
///
/// ```text
/// POST /lost-mode/start -> trigger_lost_mode
/// POST /lost-mode/stop  -> stop_lost_mode
/// POST /ring/start      -> trigger_ring
/// POST /ring/stop       -> stop_ring
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lost-mode/start", post(command::trigger_lost_mode))
        .route("/lost-mode/stop", post(command::stop_lost_mode))
        .route("/ring/start", post(command::trigger_ring))
        .route("/ring/stop", post(command::stop_ring))
}
