//! Repository for the `commands` table.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use beacon_core::command::{CommandStatus, CommandType};
use beacon_core::types::Timestamp;

use crate::models::command::Command;

/// Column list for `commands` queries.
const COLUMNS: &str =
    "command_id, target_device_id, created_by_uid, command_type, status, error, created_at";

/// Provides create/reconcile/read operations for command records.
pub struct CommandRepo;

impl CommandRepo {
    /// Insert a new command record with the initial `SENT` status.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        command_id: Uuid,
        target_device_id: &str,
        created_by_uid: &str,
        command_type: CommandType,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO commands \
                 (command_id, target_device_id, created_by_uid, command_type, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(command_id)
        .bind(target_device_id)
        .bind(created_by_uid)
        .bind(command_type.as_str())
        .bind(CommandStatus::Sent.as_str())
        .bind(now)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Fetch a command record by id.
    pub async fn find_by_id(
        pool: &PgPool,
        command_id: Uuid,
    ) -> Result<Option<Command>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM commands WHERE command_id = $1");
        sqlx::query_as::<_, Command>(&query)
            .bind(command_id)
            .fetch_optional(pool)
            .await
    }

    /// Reconcile the push outcome onto a command record.
    ///
    /// Returns `true` if the record was found and updated.
    pub async fn set_status(
        pool: &PgPool,
        command_id: Uuid,
        status: CommandStatus,
        error: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE commands SET status = $2, error = $3 WHERE command_id = $1")
            .bind(command_id)
            .bind(status.as_str())
            .bind(error)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List commands dispatched to a device, newest first.
    pub async fn list_for_device(
        pool: &PgPool,
        target_device_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Command>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM commands \
             WHERE target_device_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Command>(&query)
            .bind(target_device_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
