use serde::{Deserialize, Serialize};

/// Envelope delivered on the notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}
