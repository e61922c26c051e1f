//! Repository for the `devices` table.

use sqlx::{PgExecutor, PgPool};

use beacon_core::command::DeviceStatus;
use beacon_core::types::Timestamp;

use crate::models::device::{Device, DeviceRegistration};

/// Column list for `devices` queries.
const COLUMNS: &str = "device_id, owner_uid, device_name, fcm_token, platform, status, \
     lost_mode_enabled, lost_mode_enabled_at, lost_mode_disabled_at, lost_mode_enabled_by_uid, \
     last_lat, last_lng, last_accuracy, last_location_at, updated_at";

/// Provides read and transition operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Fetch a device by its id.
    pub async fn find_by_id(
        pool: &PgPool,
        device_id: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE device_id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(device_id)
            .fetch_optional(pool)
            .await
    }

    /// List all devices claimed by an owner, most recently updated first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_uid: &str,
    ) -> Result<Vec<Device>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM devices WHERE owner_uid = $1 ORDER BY updated_at DESC");
        sqlx::query_as::<_, Device>(&query)
            .bind(owner_uid)
            .fetch_all(pool)
            .await
    }

    /// Register a device, or refresh its profile/token fields if it already
    /// exists.
    ///
    /// On update only `device_name`, `fcm_token`, `platform`, and
    /// `updated_at` are touched; `owner_uid` is immutable once set and
    /// `status`/lost-mode/location columns are preserved. The caller must
    /// have verified ownership before calling this.
    pub async fn upsert(
        pool: &PgPool,
        registration: &DeviceRegistration,
    ) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (device_id, owner_uid, device_name, fcm_token, platform) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (device_id) DO UPDATE SET \
                 device_name = EXCLUDED.device_name, \
                 fcm_token = EXCLUDED.fcm_token, \
                 platform = EXCLUDED.platform, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&registration.device_id)
            .bind(&registration.owner_uid)
            .bind(&registration.device_name)
            .bind(&registration.fcm_token)
            .bind(&registration.platform)
            .fetch_one(pool)
            .await
    }

    /// Transition a device into lost mode.
    ///
    /// Returns `true` if the device existed and was updated.
    pub async fn mark_lost<'e>(
        executor: impl PgExecutor<'e>,
        device_id: &str,
        enabled_by_uid: &str,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE devices SET \
                 status = $2, \
                 lost_mode_enabled = TRUE, \
                 lost_mode_enabled_at = $3, \
                 lost_mode_enabled_by_uid = $4, \
                 updated_at = $3 \
             WHERE device_id = $1",
        )
        .bind(device_id)
        .bind(DeviceStatus::Lost.as_str())
        .bind(now)
        .bind(enabled_by_uid)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Transition a device out of lost mode, back to active.
    ///
    /// Returns `true` if the device existed and was updated.
    pub async fn mark_found<'e>(
        executor: impl PgExecutor<'e>,
        device_id: &str,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE devices SET \
                 status = $2, \
                 lost_mode_enabled = FALSE, \
                 lost_mode_disabled_at = $3, \
                 updated_at = $3 \
             WHERE device_id = $1",
        )
        .bind(device_id)
        .bind(DeviceStatus::Active.as_str())
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
