//! Credential shape checks

use auth_shared::constants::MIN_PASSWORD_LENGTH;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::Credentials;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").unwrap()
});

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email is required")]
    EmailEmpty,

    #[error("email is not valid")]
    EmailMalformed,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmailEmpty);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::EmailMalformed);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// All failures, email before password. Empty means valid.
pub fn validate_credentials(credentials: &Credentials) -> Vec<String> {
    [
        validate_email(&credentials.email),
        validate_password(&credentials.password),
    ]
    .into_iter()
    .filter_map(Result::err)
    .map(|e| e.to_string())
    .collect()
}
