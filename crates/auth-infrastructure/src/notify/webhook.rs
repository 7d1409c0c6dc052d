//! Outbound webhook notifier

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, warn};

use auth_core::domain::Notification;
use auth_core::repositories::{NotifyError, Notifier};

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Signature";

/// POSTs each notification as JSON. When a secret is configured the body is
/// signed: `X-Signature: hex(HMAC-SHA256(secret, body))`.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    secret: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: String, secret: Option<String>) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;
        Ok(Self { client, url, secret })
    }

    pub fn sign(secret: &str, body: &[u8]) -> Result<String, NotifyError> {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| NotifyError::Encode(format!("HMAC error: {}", e)))?;
        mac.update(body);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(&Notification {
            channel: channel.to_string(),
            event: event.to_string(),
            payload,
        })
        .map_err(|e| NotifyError::Encode(e.to_string()))?;

        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(secret) = &self.secret {
            request = request.header(SIGNATURE_HEADER, Self::sign(secret, &body)?);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            warn!("Webhook rejected {}/{}: {}", channel, event, response.status());
            return Err(NotifyError::Delivery(format!(
                "webhook responded {}",
                response.status()
            )));
        }

        debug!("Webhook delivered {}/{}", channel, event);
        Ok(())
    }
}
