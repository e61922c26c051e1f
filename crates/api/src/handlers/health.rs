//! Health check handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Liveness probe reporting service version and database reachability.
///
/// Always returns 200; a broken database shows up as `db_healthy: false`
/// so load balancers keep routing while operators see the degradation.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = beacon_db::health_check(&state.pool).await.is_ok();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "db_healthy": db_healthy,
    }))
}
