//! Route definitions.

pub mod command;
pub mod device;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/commands", command::router())
        .nest("/devices", device::router())
}
