//! Domain errors

use thiserror::Error;

/// How a failure is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Unauthorized,
    Internal,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    EmailAlreadyExists(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect Password")]
    IncorrectPassword,

    #[error("no session")]
    NoSession,

    #[error("invalid or expired session")]
    SessionNotFound,

    #[error("no active session")]
    NoActiveSession,

    #[error("decode failure: {0}")]
    SessionDecode(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("Token signing error: {0}")]
    TokenSigning(String),

    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_)
            | DomainError::InvalidInput(_)
            | DomainError::EmailAlreadyExists(_) => ErrorKind::BadRequest,
            DomainError::UserNotFound => ErrorKind::NotFound,
            DomainError::IncorrectPassword
            | DomainError::NoSession
            | DomainError::SessionNotFound
            | DomainError::NoActiveSession
            | DomainError::SessionDecode(_)
            | DomainError::InvalidToken(_) => ErrorKind::Unauthorized,
            DomainError::TokenSigning(_)
            | DomainError::StoreUnavailable(_)
            | DomainError::Serialization(_)
            | DomainError::PasswordHashError(_)
            | DomainError::DatabaseError(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand to the client. Internal detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::Validation(_) => "validation failed".to_string(),
            DomainError::InvalidInput(msg) => msg.clone(),
            DomainError::SessionDecode(_) => "decode failure".to_string(),
            DomainError::InvalidToken(_) => "invalid token".to_string(),
            DomainError::TokenSigning(_) => "failed to sign token".to_string(),
            DomainError::StoreUnavailable(_) => "session store unavailable".to_string(),
            DomainError::Serialization(_) => "failed to encode session".to_string(),
            DomainError::PasswordHashError(_) => "failed to process credentials".to_string(),
            DomainError::DatabaseError(_) => "user store unavailable".to_string(),
            other => other.to_string(),
        }
    }

    /// Validator messages carried by a `Validation` failure.
    pub fn details(&self) -> &[String] {
        match self {
            DomainError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
