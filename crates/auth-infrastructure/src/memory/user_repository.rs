use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use auth_core::domain::{NewUser, UserRecord};
use auth_core::error::DomainError;
use auth_core::repositories::UserRepository;

/// Accounts keyed by lower-cased email, matching the Postgres unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, UserRecord>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        Ok(self
            .users
            .get(&email.to_lowercase())
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: &NewUser) -> Result<UserRecord, DomainError> {
        match self.users.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists(user.email.clone())),
            Entry::Vacant(slot) => {
                let record = UserRecord::from(user.clone());
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}
