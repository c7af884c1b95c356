//! Password value object.
//!
//! Passwords are kept as plaintext and compared exactly; the wrapper exists to
//! keep the policy check in one place and the value out of debug output.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::validation::validate_password;

/// Plaintext password that has passed (or was persisted after passing) the policy.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

// Don't expose the password in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl Password {
    /// Create a password after checking the policy.
    ///
    /// # Errors
    /// Returns a validation error if the policy is not met.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        validate_password(plain_text).map_err(|e| {
            DomainError::validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid password".to_string()),
            )
        })?;
        Ok(Self(plain_text.to_string()))
    }

    /// Wrap an already stored password without re-checking the policy.
    pub fn from_stored(stored: String) -> Self {
        Self(stored)
    }

    /// Exact comparison against a candidate.
    pub fn verify(&self, plain_text: &str) -> bool {
        self.0 == plain_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_new_and_verify() {
        let password = Password::new("Abc@1234").unwrap();

        assert!(password.verify("Abc@1234"));
        assert!(!password.verify("abc@1234"));
        assert!(!password.verify("Abc@12345"));
    }

    #[test]
    fn test_password_rejects_weak() {
        let result = Password::new("weak");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::from_stored("Secret@123".to_string());
        let debug = format!("{:?}", password);

        assert!(!debug.contains("Secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_password_serializes_as_plain_string() {
        let password = Password::from_stored("Abc@1234".to_string());
        assert_eq!(serde_json::to_string(&password).unwrap(), "\"Abc@1234\"");
    }
}
