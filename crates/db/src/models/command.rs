//! Command entity model.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use beacon_core::types::Timestamp;

/// A row from the `commands` table.
///
/// Append-mostly: created once per dispatch, then `status`/`error` are
/// reconciled at most once by the same dispatch call.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command_id: Uuid,
    pub target_device_id: String,
    pub created_by_uid: String,
    #[serde(rename = "type")]
    pub command_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: Timestamp,
}
