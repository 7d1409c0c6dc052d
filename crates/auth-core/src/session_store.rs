//! Typed session persistence over a key-value backend

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::domain::{SessionId, SessionRecord};
use crate::error::DomainError;
use crate::repositories::SessionBackend;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Stored session does not match the record schema: {0}")]
    Corrupt(String),

    #[error("Failed to serialize session: {0}")]
    Serialization(String),
}

impl From<SessionStoreError> for DomainError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::StoreUnavailable(msg) => DomainError::StoreUnavailable(msg),
            SessionStoreError::Corrupt(msg) => DomainError::SessionDecode(msg),
            SessionStoreError::Serialization(msg) => DomainError::Serialization(msg),
        }
    }
}

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn SessionBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    pub async fn create(
        &self,
        session_id: &SessionId,
        record: &SessionRecord,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let value = serde_json::to_vec(record)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        self.backend
            .set(&session_id.to_string(), value, ttl)
            .await
            .map_err(|e| SessionStoreError::StoreUnavailable(e.to_string()))?;

        debug!("Stored session record (ttl: {}s)", ttl.as_secs());
        Ok(())
    }

    /// `Ok(None)` covers both "never existed" and "expired".
    pub async fn get(&self, session_id: &SessionId) -> Result<Option<SessionRecord>, SessionStoreError> {
        let Some(raw) = self
            .backend
            .get(&session_id.to_string())
            .await
            .map_err(|e| SessionStoreError::StoreUnavailable(e.to_string()))?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }

    /// Idempotent. Returns whether a record was actually removed.
    pub async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        self.backend
            .delete(&session_id.to_string())
            .await
            .map_err(|e| SessionStoreError::StoreUnavailable(e.to_string()))
    }
}
