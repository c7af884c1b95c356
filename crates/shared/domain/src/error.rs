//! Domain-level errors.
//!
//! These errors represent business rule violations. Persistence failures are
//! never reported through this type.

use thiserror::Error;
use validator::ValidationErrors;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed input (bad email shape, weak password, out-of-range rating, short name)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another user already registered this email (case-insensitive)
    #[error("An account with this email already exists")]
    DuplicateEmail,

    /// Action not permitted for the acting user
    #[error("Forbidden")]
    Forbidden,

    /// Current password did not match the stored one
    #[error("Current password is incorrect")]
    WrongPassword,

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Owner already has a store
    #[error("Owner already has a store")]
    AlreadyOwnsStore,

    /// No user matches the supplied email, password and role
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first message, fields are visited in name order
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .into_iter()
            .flat_map(|(_, errors)| errors.iter())
            .find_map(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());

        DomainError::Validation(message)
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
