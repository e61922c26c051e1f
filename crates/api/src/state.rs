use std::sync::Arc;

use beacon_push::PushGateway;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The push gateway is injected here as a trait object so tests
/// can substitute a recording double.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: beacon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Push gateway used for best-effort command delivery.
    pub push: Arc<dyn PushGateway>,
}
