//! Push-gateway seam.
//!
//! The dispatch workflow only needs "deliver this addressed data payload or
//! fail with an error", so that is the whole trait. The production
//! implementation is [`FcmClient`]; tests inject
//! [`testing::MockGateway`].

pub mod fcm;
pub mod testing;

use std::collections::BTreeMap;

use async_trait::async_trait;

pub use fcm::{FcmClient, FcmConfig};

/// An addressed data message for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// The device's registration token.
    pub token: String,
    /// Flat string-keyed payload; values must already be strings.
    pub data: BTreeMap<String, String>,
    /// Request high delivery priority (Android).
    pub high_priority: bool,
    /// Request a background wake (iOS `content-available`).
    pub content_available: bool,
}

/// Errors produced by a push gateway.
///
/// The `Display` output of these variants is what gets persisted onto a
/// command record on delivery failure, so it stays a short stable summary
/// rather than echoing gateway response bodies.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("push request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("push gateway returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("push gateway rejected the message: {0}")]
    Rejected(String),
}

/// Best-effort delivery channel used to wake/notify a target device.
///
/// Implementations must not retry internally; dispatch treats every failure
/// as final and non-fatal.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError>;
}
