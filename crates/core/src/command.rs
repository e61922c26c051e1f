//! Command vocabulary and push-payload construction.
//!
//! A dispatched command is stored durably with one of the [`CommandType`]
//! values and announced to the device as a flat string-keyed data payload.
//! The payload layout differs per command type and is fixed by the device
//! client, so it is built here and unit-tested rather than assembled inline
//! in handlers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{CommandId, Timestamp};

/// The four remote commands an owner can dispatch to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    StartLostMode,
    StopLostMode,
    StartRing,
    StopRing,
}

impl CommandType {
    /// The stored representation (`command_type` column).
    pub fn as_str(self) -> &'static str {
        match self {
            CommandType::StartLostMode => "START_LOST_MODE",
            CommandType::StopLostMode => "STOP_LOST_MODE",
            CommandType::StartRing => "START_RING",
            CommandType::StopRing => "STOP_RING",
        }
    }

    /// The `command` value sent in the push payload.
    ///
    /// Identical to [`as_str`](Self::as_str) except for `START_RING`, which
    /// the device client expects as plain `RING`.
    pub fn wire_name(self) -> &'static str {
        match self {
            CommandType::StartRing => "RING",
            other => other.as_str(),
        }
    }

    /// Start-type commands carry a `commandId` back to the caller and have
    /// their push outcome reconciled onto the command record. Stop-type
    /// commands are fire-and-forget.
    pub fn is_start(self) -> bool {
        matches!(self, CommandType::StartLostMode | CommandType::StartRing)
    }

    /// Lost-mode commands transition the device row; ring commands do not.
    pub fn mutates_device(self) -> bool {
        matches!(self, CommandType::StartLostMode | CommandType::StopLostMode)
    }

    /// Ring commands request high delivery priority and an iOS
    /// background-wake hint so a pocketed phone actually rings.
    pub fn wants_wake_hints(self) -> bool {
        matches!(self, CommandType::StartRing | CommandType::StopRing)
    }

    /// Human-readable success message returned to the caller.
    pub fn success_message(self) -> &'static str {
        match self {
            CommandType::StartLostMode => "Lost Mode Triggered",
            CommandType::StopLostMode => "Lost Mode Stopped",
            CommandType::StartRing => "Ring Triggered",
            CommandType::StopRing => "Ring Stopped",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "START_LOST_MODE" => Ok(CommandType::StartLostMode),
            "STOP_LOST_MODE" => Ok(CommandType::StopLostMode),
            "START_RING" => Ok(CommandType::StartRing),
            "STOP_RING" => Ok(CommandType::StopRing),
            other => Err(format!("unknown command type: {other}")),
        }
    }
}

/// Delivery status of a stored command record.
///
/// `Sent` is the initial state. Start-type commands may be finalized to
/// `SentNoToken` (device has no push address) or `SentButFcmFailed`
/// (gateway rejected delivery); stop-type commands stay `Sent` regardless
/// of push outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Sent,
    SentNoToken,
    SentButFcmFailed,
}

impl CommandStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandStatus::Sent => "SENT",
            CommandStatus::SentNoToken => "SENT_NO_TOKEN",
            CommandStatus::SentButFcmFailed => "SENT_BUT_FCM_FAILED",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device lifecycle status (`status` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Active,
    Lost,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Active => "ACTIVE",
            DeviceStatus::Lost => "LOST",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the flat data payload announcing `command` to a device.
///
/// - Start-type commands include the `commandId` so the device can report
///   against the audit record.
/// - `START_LOST_MODE` additionally carries the dispatch timestamp as a
///   millisecond string (push data values must be strings).
/// - Stop-type commands carry only the command name and the target id.
pub fn data_payload(
    command: CommandType,
    command_id: CommandId,
    device_id: &str,
    now: Timestamp,
) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    data.insert("command".to_string(), command.wire_name().to_string());
    data.insert("targetDeviceId".to_string(), device_id.to_string());

    if command.is_start() {
        data.insert("commandId".to_string(), command_id.to_string());
    }
    if command == CommandType::StartLostMode {
        data.insert("timestamp".to_string(), now.timestamp_millis().to_string());
    }

    data
}
