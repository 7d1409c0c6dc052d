use auth_core::{DomainError, ErrorKind};
use auth_core::repositories::NotifyError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String, details: Vec<String> },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.public_message();
        match err.kind() {
            ErrorKind::BadRequest => ApiError::BadRequest {
                message,
                details: err.details().to_vec(),
            },
            ErrorKind::NotFound => ApiError::NotFound(message),
            ErrorKind::Unauthorized => ApiError::Unauthorized(message),
            ErrorKind::Internal => {
                // Full detail goes to the log, the client only sees the public message
                tracing::error!("{}", err);
                ApiError::InternalError(message)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        tracing::error!("Notification failed: {}", err);
        ApiError::InternalError("failed to publish notification".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message, details) = match self {
            ApiError::BadRequest { message, details } => {
                tracing::warn!("Bad request: {}", message);
                ("BadRequest", message, details)
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                ("Unauthorized", msg, Vec::new())
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                ("NotFound", msg, Vec::new())
            }
            ApiError::InternalError(msg) => ("InternalError", msg, Vec::new()),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let cases = [
            (DomainError::Validation(vec!["email is required".into()]), StatusCode::BAD_REQUEST),
            (DomainError::EmailAlreadyExists("a@b.com".into()), StatusCode::BAD_REQUEST),
            (DomainError::UserNotFound, StatusCode::NOT_FOUND),
            (DomainError::IncorrectPassword, StatusCode::UNAUTHORIZED),
            (DomainError::NoSession, StatusCode::UNAUTHORIZED),
            (DomainError::SessionDecode("eof".into()), StatusCode::UNAUTHORIZED),
            (DomainError::StoreUnavailable("refused".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_validation_details_survive() {
        let err = ApiError::from(DomainError::Validation(vec![
            "email is not valid".into(),
            "password must be at least 6 characters".into(),
        ]));

        match err {
            ApiError::BadRequest { details, .. } => assert_eq!(details.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::from(DomainError::DatabaseError("password authentication failed for user postgres".into()));
        assert!(!err.to_string().contains("postgres"));
    }
}
