use async_trait::async_trait;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use auth_core::repositories::{BackendError, SessionBackend};

struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Expiry is lazy: an expired entry is dropped when next read or deleted,
/// and reported as absent. There is no sweeper.
#[derive(Default)]
pub struct MemorySessionBackend {
    map: DashMap<String, Entry>,
}

impl MemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.map.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        let entry = self.map.get(key)?;
        (!entry.is_expired(Instant::now())).then(|| entry.value.clone())
    }
}

#[async_trait]
impl SessionBackend for MemorySessionBackend {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError> {
        let entry = Entry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.map.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let Some(entry) = self.map.get(key) else {
            return Ok(None);
        };
        if entry.is_expired(Instant::now()) {
            drop(entry); // release the shard lock before removing
            self.map.remove(key);
            debug!("Session entry expired, removed");
            return Ok(None);
        }
        Ok(Some(entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let now = Instant::now();
        Ok(self
            .map
            .remove(key)
            .is_some_and(|(_, entry)| !entry.is_expired(now)))
    }
}
