//! Key-value backend with native expiry (port)

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("session backend unavailable: {0}")]
pub struct BackendError(pub String);

/// Values are opaque bytes. Expiry is enforced by the backend itself: an
/// expired key is indistinguishable from one that never existed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Overwrites any existing value at `key`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;
    /// `Ok(false)` when nothing was stored under `key`.
    async fn delete(&self, key: &str) -> Result<bool, BackendError>;
}
