//! FCM HTTP client implementing [`PushGateway`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{PushError, PushGateway, PushMessage};

/// Default FCM legacy HTTP send endpoint.
const DEFAULT_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";

/// Configuration for the FCM client, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FcmConfig {
    /// Send endpoint (overridable for emulators/tests).
    pub endpoint: String,
    /// Server key used for `Authorization: key=<...>`.
    pub server_key: String,
}

impl FcmConfig {
    /// Load FCM configuration from the environment.
    ///
    /// | Env Var          | Required | Default                                 |
    /// |------------------|----------|-----------------------------------------|
    /// | `FCM_SERVER_KEY` | **yes**  | --                                      |
    /// | `FCM_ENDPOINT`   | no       | `https://fcm.googleapis.com/fcm/send`   |
    ///
    /// # Panics
    ///
    /// Panics if `FCM_SERVER_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let server_key =
            std::env::var("FCM_SERVER_KEY").expect("FCM_SERVER_KEY must be set in the environment");
        assert!(!server_key.is_empty(), "FCM_SERVER_KEY must not be empty");

        let endpoint =
            std::env::var("FCM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Self {
            endpoint,
            server_key,
        }
    }
}

/// Request body for the legacy FCM send endpoint.
#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    to: &'a str,
    data: &'a std::collections::BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_available: Option<bool>,
}

/// Minimal slice of the FCM response we act on.
#[derive(Debug, Deserialize)]
struct FcmResponse {
    #[serde(default)]
    failure: u32,
    #[serde(default)]
    results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
struct FcmResult {
    error: Option<String>,
}

/// Production push gateway speaking the FCM legacy HTTP protocol.
pub struct FcmClient {
    http: reqwest::Client,
    config: FcmConfig,
}

impl FcmClient {
    pub fn new(config: FcmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PushGateway for FcmClient {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let body = FcmRequest {
            to: &message.token,
            data: &message.data,
            priority: message.high_priority.then_some("high"),
            content_available: message.content_available.then_some(true),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.config.server_key),
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PushError::Status(status));
        }

        let parsed: FcmResponse = response.json().await?;
        if parsed.failure > 0 {
            let reason = parsed
                .results
                .iter()
                .find_map(|r| r.error.as_deref())
                .unwrap_or("unspecified");
            return Err(PushError::Rejected(reason.to_string()));
        }

        tracing::debug!(command = %message.data.get("command").map(String::as_str).unwrap_or("?"),
            "Push accepted by gateway");
        Ok(())
    }
}
