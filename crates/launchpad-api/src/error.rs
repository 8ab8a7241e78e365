// ============================================================================
// Launchpad API - Error Responses
// File: crates/launchpad-api/src/error.rs
// ============================================================================

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use launchpad_core::{DomainError, FieldErrors};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Body, path or query string could not be decoded
    #[error("Malformed request: {message}")]
    Malformed { status: StatusCode, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Domain(DomainError::Validation(errors))
    }
}

fn password_field(message: &str) -> Option<FieldErrors> {
    let mut fields = FieldErrors::new();
    fields.add("password", message);
    Some(fields)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None)
            }
            ApiError::Malformed { status, message } => {
                tracing::warn!("Malformed request: {}", message);
                (status, "MALFORMED_REQUEST", message, None)
            }
            ApiError::Domain(err) => match err {
                DomainError::Validation(fields) => {
                    tracing::warn!("Validation failed on {} field(s)", fields.len());
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "VALIDATION_ERROR",
                        "Some fields are invalid".to_string(),
                        Some(fields),
                    )
                }
                DomainError::PasswordTooShort => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    err.to_string(),
                    password_field("Password is too short"),
                ),
                DomainError::PasswordTooLong => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    err.to_string(),
                    password_field("Password is too long"),
                ),
                DomainError::PasswordTooWeak => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    err.to_string(),
                    password_field("Password is too easy to guess"),
                ),
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", err.to_string(), None)
                }
                DomainError::Unauthenticated(_) => {
                    tracing::warn!("{}", err);
                    (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", err.to_string(), None)
                }
                DomainError::UserNotActive => {
                    (StatusCode::FORBIDDEN, "ACCOUNT_INACTIVE", err.to_string(), None)
                }
                DomainError::PermissionDenied(_) => {
                    (StatusCode::FORBIDDEN, "FORBIDDEN", err.to_string(), None)
                }
                DomainError::NotFound { .. } => {
                    tracing::warn!("{}", err);
                    (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string(), None)
                }
                DomainError::EmailAlreadyExists(_) => (
                    StatusCode::CONFLICT,
                    "EMAIL_EXISTS",
                    "An account with this email already exists".to_string(),
                    None,
                ),
                DomainError::InvalidTransition { .. } => {
                    tracing::warn!("{}", err);
                    (StatusCode::CONFLICT, "INVALID_TRANSITION", err.to_string(), None)
                }
                DomainError::InvalidState(_) => {
                    tracing::warn!("{}", err);
                    (StatusCode::CONFLICT, "INVALID_STATE", err.to_string(), None)
                }
                DomainError::TooManyAttempts => {
                    (StatusCode::TOO_MANY_REQUESTS, "TOO_MANY_ATTEMPTS", err.to_string(), None)
                }
                DomainError::PasswordHashError(_)
                | DomainError::TokenGenerationError(_)
                | DomainError::InternalError(_) => {
                    tracing::error!("Internal error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Internal server error".to_string(),
                        None,
                    )
                }
            },
        };

        let body = Json(ApiResponse::<()>::error_with_fields(code, &message, fields));
        (status, body).into_response()
    }
}
