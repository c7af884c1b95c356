//! Field rules shared by signup, the admin add-user form and password changes.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

use crate::constants::{
    MAX_PASSWORD_LENGTH, MAX_RATING, MIN_PASSWORD_LENGTH, MIN_RATING, PASSWORD_SPECIAL_CHARS,
};
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static UPPERCASE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]").expect("uppercase pattern is valid"));

/// Message reported for any password that fails the policy
pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must be 8-16 characters with one uppercase letter and one special character";

/// Message reported for a malformed email
pub const EMAIL_MESSAGE: &str = "Invalid email format";

/// Message reported when a password and its confirmation differ
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Check that an email has the `local@domain.tld` shape.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(error("email", EMAIL_MESSAGE))
    }
}

/// Check the password policy: 8-16 characters on one line, at least one
/// uppercase letter and at least one of `!@#$%^&*`.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    let single_line = !password.contains(['\n', '\r']);
    let has_upper = UPPERCASE_REGEX.is_match(password);
    let has_special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length)
        && single_line
        && has_upper
        && has_special
    {
        Ok(())
    } else {
        Err(error("password", PASSWORD_POLICY_MESSAGE))
    }
}

/// Check that a star rating is within 1..=5.
pub fn validate_rating(rating: u8) -> DomainResult<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )))
    }
}

/// Check that a typed-twice password matches its confirmation exactly.
pub fn confirm_password(password: &str, confirmation: &str) -> DomainResult<()> {
    if password == confirmation {
        Ok(())
    } else {
        Err(DomainError::validation(PASSWORD_MISMATCH_MESSAGE))
    }
}
