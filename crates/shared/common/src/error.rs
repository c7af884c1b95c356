//! Presentation-facing error handling.
//!
//! Maps domain failures onto stable codes and messages for whatever front end
//! renders them (the command line today).

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    WrongPassword,

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("You already have a store")]
    AlreadyOwnsStore,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::WrongPassword => "WRONG_PASSWORD",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateEmail => "DUPLICATE_EMAIL",
            AppError::AlreadyOwnsStore => "ALREADY_OWNS_STORE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::DuplicateEmail => AppError::DuplicateEmail,
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::WrongPassword => AppError::WrongPassword,
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::AlreadyOwnsStore => AppError::AlreadyOwnsStore,
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_codes() {
        let cases = [
            (DomainError::validation("bad"), "VALIDATION_ERROR"),
            (DomainError::DuplicateEmail, "DUPLICATE_EMAIL"),
            (DomainError::Forbidden, "FORBIDDEN"),
            (DomainError::WrongPassword, "WRONG_PASSWORD"),
            (DomainError::not_found("Store"), "NOT_FOUND"),
            (DomainError::AlreadyOwnsStore, "ALREADY_OWNS_STORE"),
            (DomainError::InvalidCredentials, "INVALID_CREDENTIALS"),
        ];

        for (domain, code) in cases {
            assert_eq!(AppError::from(domain).code(), code);
        }
    }

    #[test]
    fn test_user_message_shows_validation_text() {
        let err = AppError::from(DomainError::validation("Invalid email format"));
        assert_eq!(err.user_message(), "Invalid email format");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.user_message(), "An internal error occurred");
    }
}
