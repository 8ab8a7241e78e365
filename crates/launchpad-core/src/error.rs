//! Domain errors

use thiserror::Error;

use crate::validation::FieldErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("User not active")]
    UserNotActive,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password too short")]
    PasswordTooShort,

    #[error("Password too long")]
    PasswordTooLong,

    #[error("Password too weak")]
    PasswordTooWeak,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(FieldErrors::from(errors))
    }
}
