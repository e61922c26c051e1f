//! Handlers for device registration and owner-facing device reads.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use beacon_core::error::CoreError;
use beacon_core::validate::require_field;
use beacon_db::models::device::{DeviceRegistration, DeviceView};
use beacon_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::command::load_owned_device;
use crate::middleware::auth::AuthOwner;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback device name when the client does not supply one.
const DEFAULT_DEVICE_NAME: &str = "Unknown Device";
/// Fallback platform when the client does not supply one.
const DEFAULT_PLATFORM: &str = "unknown";

// ---------------------------------------------------------------------------
// Request / response shapes
// ---------------------------------------------------------------------------

/// Body for `POST /devices/register`.
///
/// Required fields are `Option` so that missing values surface as
/// `invalid-argument` rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub device_id: Option<String>,
    pub fcm_token: Option<String>,
    pub device_name: Option<String>,
    pub platform: Option<String>,
}

/// Success response for `POST /devices/register`.
#[derive(Debug, Serialize)]
pub struct RegisterDeviceResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// POST /devices/register
// ---------------------------------------------------------------------------

/// Register a device under the caller, or refresh its profile/token fields.
///
/// Re-registration by the same owner is idempotent on `status` and lost-mode
/// state; a device already claimed by a different owner yields
/// `permission-denied`.
pub async fn register_device(
    State(state): State<AppState>,
    owner: AuthOwner,
    Json(body): Json<RegisterDeviceRequest>,
) -> AppResult<impl IntoResponse> {
    let device_id =
        require_field("deviceId", body.device_id.as_deref()).map_err(AppError::Core)?;
    let fcm_token =
        require_field("fcmToken", body.fcm_token.as_deref()).map_err(AppError::Core)?;

    // A device is exclusively claimed by its first registrant.
    if let Some(existing) = DeviceRepo::find_by_id(&state.pool, device_id).await? {
        if existing.owner_uid != owner.uid {
            return Err(AppError::Core(CoreError::Forbidden(
                "Device already registered to another user".into(),
            )));
        }
    }

    let registration = DeviceRegistration {
        device_id: device_id.to_string(),
        owner_uid: owner.uid.clone(),
        device_name: body
            .device_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
        fcm_token: fcm_token.to_string(),
        platform: body
            .platform
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
    };

    let device = DeviceRepo::upsert(&state.pool, &registration).await?;
    tracing::info!(device_id = %device.device_id, owner_uid = %device.owner_uid,
        platform = %device.platform, "Device registered");

    Ok(Json(RegisterDeviceResponse { success: true }))
}

// ---------------------------------------------------------------------------
// GET /devices
// ---------------------------------------------------------------------------

/// List the caller's devices, most recently updated first.
pub async fn list_devices(
    State(state): State<AppState>,
    owner: AuthOwner,
) -> AppResult<impl IntoResponse> {
    let devices = DeviceRepo::list_for_owner(&state.pool, &owner.uid).await?;
    let views: Vec<DeviceView> = devices.into_iter().map(DeviceView::from).collect();
    Ok(Json(DataResponse { data: views }))
}

// ---------------------------------------------------------------------------
// GET /devices/{deviceId}
// ---------------------------------------------------------------------------

/// Fetch one of the caller's devices.
pub async fn get_device(
    State(state): State<AppState>,
    owner: AuthOwner,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let device = load_owned_device(&state.pool, &device_id, &owner.uid).await?;
    Ok(Json(DataResponse {
        data: DeviceView::from(device),
    }))
}
