//! Credential store gateway (port)

use async_trait::async_trait;
use crate::domain::{NewUser, UserRecord};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Ok(None)` when no account has this email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<UserRecord, DomainError>;
}
