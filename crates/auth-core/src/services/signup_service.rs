//! Account registration

use std::sync::Arc;
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use auth_security::PasswordService;
use auth_shared::utils::mask_email;

use crate::domain::{Credentials, NewUser, SignupParams, UserRecord};
use crate::error::DomainError;
use crate::repositories::UserRepository;
use crate::validation::validate_credentials;

pub struct SignupService {
    user_repo: Arc<dyn UserRepository>,
}

impl SignupService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Validate, hash, and insert. The plaintext password never reaches the store.
    pub async fn register(&self, params: SignupParams) -> Result<UserRecord, DomainError> {
        let masked = mask_email(&params.email);
        info!("Registration attempt for {}", masked);

        let mut errors = validate_credentials(&Credentials::new(&params.email, &params.password));
        if params.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if params.username.trim().is_empty() {
            errors.push("username is required".to_string());
        }
        if !errors.is_empty() {
            warn!("Registration rejected for {}: {}", masked, errors.join(", "));
            return Err(DomainError::Validation(errors));
        }

        if self.user_repo.find_by_email(&params.email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", masked);
            return Err(DomainError::EmailAlreadyExists(params.email));
        }

        let password_hash = PasswordService::hash(&params.password).map_err(|e| {
            error!("Password hashing failed: {}", e);
            DomainError::PasswordHashError(e.to_string())
        })?;

        let now = Utc::now();
        let new_user = NewUser {
            id: Uuid::new_v4(),
            name: params.name.trim().to_string(),
            username: params.username.trim().to_string(),
            email: params.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.user_repo.create(&new_user).await?;
        info!("Registration successful for {}", masked);
        Ok(created)
    }
}
