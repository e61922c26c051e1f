//! Recording test double for [`PushGateway`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{PushError, PushGateway, PushMessage};

/// In-memory gateway that records every message it is asked to send and
/// can be switched into a failing mode.
#[derive(Default)]
pub struct MockGateway {
    sent: Mutex<Vec<PushMessage>>,
    fail_with: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every send with the given reason.
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(reason.to_string())),
        }
    }

    /// Messages accepted so far (failed sends are not recorded).
    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for MockGateway {
    async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            return Err(PushError::Rejected(reason));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn message() -> PushMessage {
        PushMessage {
            token: "tok-1".to_string(),
            data: BTreeMap::from([("command".to_string(), "RING".to_string())]),
            high_priority: true,
            content_available: true,
        }
    }

    #[tokio::test]
    async fn records_accepted_messages() {
        let gateway = MockGateway::new();
        gateway.send(&message()).await.unwrap();

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].token, "tok-1");
    }

    #[tokio::test]
    async fn failing_gateway_rejects_and_records_nothing() {
        let gateway = MockGateway::failing("token unregistered");
        let err = gateway.send(&message()).await.unwrap_err();

        assert!(matches!(err, PushError::Rejected(ref r) if r == "token unregistered"));
        assert!(gateway.sent().is_empty());
    }
}
