//! Handlers for the command-dispatch endpoints.
//!
//! Every dispatch endpoint runs the same four-phase protocol:
//!
//! 1. Lookup & ownership: load the target device, verify the caller owns it.
//! 2. State transition (lost-mode commands only): flip the device row.
//! 3. Command record: insert an audit record with status `SENT`. Phases 2
//!    and 3 share one transaction.
//! 4. Push attempt: best-effort delivery through the gateway, reconciling
//!    the record's status on failure. Never fails the call -- the device
//!    and command rows are the source of truth, push is advisory.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use beacon_core::command::{self, CommandStatus, CommandType};
use beacon_core::error::CoreError;
use beacon_core::validate::require_field;
use beacon_db::models::device::Device;
use beacon_db::repositories::{CommandRepo, DeviceRepo};
use beacon_push::PushMessage;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthOwner;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Body shared by all four dispatch endpoints.
///
/// `target_device_id` is `Option` so a missing field maps to
/// `invalid-argument` instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub target_device_id: Option<String>,
}

/// Success response for dispatch calls.
///
/// `command_id` is present for start-type commands only; stop commands are
/// fire-and-forget and do not hand the id back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_id: Option<Uuid>,
}

/// Pagination parameters for the command audit log.
#[derive(Debug, Deserialize)]
pub struct ListCommandsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Phase 1: load the device and verify the caller owns it.
pub(crate) async fn load_owned_device(
    pool: &sqlx::PgPool,
    device_id: &str,
    owner_uid: &str,
) -> AppResult<Device> {
    let device = DeviceRepo::find_by_id(pool, device_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Device",
                id: device_id.to_string(),
            })
        })?;

    if device.owner_uid != owner_uid {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this device".into(),
        )));
    }

    Ok(device)
}

/// Phases 2-4 of the dispatch protocol.
async fn dispatch(
    state: &AppState,
    owner: &AuthOwner,
    body: &DispatchRequest,
    op: CommandType,
) -> AppResult<Json<DispatchResponse>> {
    let device_id = require_field("targetDeviceId", body.target_device_id.as_deref())
        .map_err(AppError::Core)?;

    let device = load_owned_device(&state.pool, device_id, &owner.uid).await?;

    let now = Utc::now();
    let command_id = Uuid::new_v4();

    // Phase 2 + 3: device transition (lost-mode ops) and audit record,
    // committed together.
    let mut tx = state.pool.begin().await?;
    match op {
        CommandType::StartLostMode => {
            DeviceRepo::mark_lost(&mut *tx, device_id, &owner.uid, now).await?;
        }
        CommandType::StopLostMode => {
            DeviceRepo::mark_found(&mut *tx, device_id, now).await?;
        }
        CommandType::StartRing | CommandType::StopRing => {}
    }
    CommandRepo::create(&mut *tx, command_id, device_id, &owner.uid, op, now).await?;
    tx.commit().await?;

    if op.mutates_device() {
        let status = match op {
            CommandType::StartLostMode => "LOST",
            _ => "ACTIVE",
        };
        tracing::info!(device_id, status, "Device state transitioned");
    }
    tracing::info!(device_id, command_id = %command_id, command = %op, "Command recorded");

    // Phase 4: best-effort push with status reconciliation. Start-type
    // commands record the outcome; stop-type commands stay SENT regardless.
    match device.push_token() {
        None => {
            tracing::info!(device_id, "No push token registered for device");
            if op.is_start() {
                CommandRepo::set_status(&state.pool, command_id, CommandStatus::SentNoToken, None)
                    .await?;
            }
        }
        Some(token) => {
            let message = PushMessage {
                token: token.to_string(),
                data: command::data_payload(op, command_id, device_id, now),
                high_priority: op.wants_wake_hints(),
                content_available: op.wants_wake_hints(),
            };
            match state.push.send(&message).await {
                Ok(()) => {
                    tracing::info!(device_id, command_id = %command_id, "Push delivered to gateway");
                }
                Err(err) => {
                    tracing::warn!(device_id, command_id = %command_id, error = %err,
                        "Push delivery failed");
                    if op.is_start() {
                        CommandRepo::set_status(
                            &state.pool,
                            command_id,
                            CommandStatus::SentButFcmFailed,
                            Some(&err.to_string()),
                        )
                        .await?;
                    }
                }
            }
        }
    }

    Ok(Json(DispatchResponse {
        success: true,
        message: op.success_message(),
        command_id: op.is_start().then_some(command_id),
    }))
}

// ---------------------------------------------------------------------------
// POST /commands/lost-mode/start
// ---------------------------------------------------------------------------

/// Put the target device into lost mode and announce it.
pub async fn trigger_lost_mode(
    State(state): State<AppState>,
    owner: AuthOwner,
    Json(body): Json<DispatchRequest>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &owner, &body, CommandType::StartLostMode).await
}

// ---------------------------------------------------------------------------
// POST /commands/lost-mode/stop
// ---------------------------------------------------------------------------

/// Bring the target device out of lost mode.
pub async fn stop_lost_mode(
    State(state): State<AppState>,
    owner: AuthOwner,
    Json(body): Json<DispatchRequest>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &owner, &body, CommandType::StopLostMode).await
}

// ---------------------------------------------------------------------------
// POST /commands/ring/start
// ---------------------------------------------------------------------------

/// Make the target device ring. Does not mutate device state.
pub async fn trigger_ring(
    State(state): State<AppState>,
    owner: AuthOwner,
    Json(body): Json<DispatchRequest>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &owner, &body, CommandType::StartRing).await
}

// ---------------------------------------------------------------------------
// POST /commands/ring/stop
// ---------------------------------------------------------------------------

/// Silence a ringing device. Does not mutate device state.
pub async fn stop_ring(
    State(state): State<AppState>,
    owner: AuthOwner,
    Json(body): Json<DispatchRequest>,
) -> AppResult<impl IntoResponse> {
    dispatch(&state, &owner, &body, CommandType::StopRing).await
}

// ---------------------------------------------------------------------------
// GET /devices/{deviceId}/commands
// ---------------------------------------------------------------------------

/// Owner-only audit log of commands dispatched to a device, newest first.
pub async fn list_commands(
    State(state): State<AppState>,
    owner: AuthOwner,
    Path(device_id): Path<String>,
    Query(params): Query<ListCommandsParams>,
) -> AppResult<impl IntoResponse> {
    load_owned_device(&state.pool, &device_id, &owner.uid).await?;

    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let commands = CommandRepo::list_for_device(&state.pool, &device_id, limit, offset).await?;
    Ok(Json(DataResponse { data: commands }))
}
