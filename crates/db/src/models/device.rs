//! Device entity model and API views.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use beacon_core::types::Timestamp;

/// A row from the `devices` table. Sub-records are stored flattened.
#[derive(Debug, Clone, FromRow)]
pub struct Device {
    pub device_id: String,
    pub owner_uid: String,
    pub device_name: String,
    pub fcm_token: Option<String>,
    pub platform: String,
    pub status: String,
    pub lost_mode_enabled: bool,
    pub lost_mode_enabled_at: Option<Timestamp>,
    pub lost_mode_disabled_at: Option<Timestamp>,
    pub lost_mode_enabled_by_uid: Option<String>,
    pub last_lat: Option<f64>,
    pub last_lng: Option<f64>,
    pub last_accuracy: Option<f64>,
    pub last_location_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Device {
    /// The push address, if the device has registered one.
    ///
    /// Treats an empty stored token the same as no token at all.
    pub fn push_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Lost-mode sub-record as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LostModeView {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_by_uid: Option<String>,
}

/// Last reported location as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>,
    pub updated_at: Option<Timestamp>,
}

/// Owner-facing view of a device (push token withheld).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub device_id: String,
    pub owner_uid: String,
    pub device_name: String,
    pub platform: String,
    pub status: String,
    pub lost_mode: LostModeView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_location: Option<LocationView>,
    pub updated_at: Timestamp,
}

impl From<Device> for DeviceView {
    fn from(row: Device) -> Self {
        let last_location = match (row.last_lat, row.last_lng) {
            (Some(lat), Some(lng)) => Some(LocationView {
                lat,
                lng,
                accuracy: row.last_accuracy,
                updated_at: row.last_location_at,
            }),
            _ => None,
        };

        DeviceView {
            device_id: row.device_id,
            owner_uid: row.owner_uid,
            device_name: row.device_name,
            platform: row.platform,
            status: row.status,
            lost_mode: LostModeView {
                enabled: row.lost_mode_enabled,
                enabled_at: row.lost_mode_enabled_at,
                disabled_at: row.lost_mode_disabled_at,
                enabled_by_uid: row.lost_mode_enabled_by_uid,
            },
            last_location,
            updated_at: row.updated_at,
        }
    }
}

/// Validated registration input for [`DeviceRepo::upsert`].
///
/// [`DeviceRepo::upsert`]: crate::repositories::DeviceRepo::upsert
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRegistration {
    pub device_id: String,
    pub owner_uid: String,
    pub device_name: String,
    pub fcm_token: String,
    pub platform: String,
}
