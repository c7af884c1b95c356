//! User domain entity and related types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    MAX_ADDRESS_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH, ROLE_ADMINISTRATOR, ROLE_NORMAL_USER,
    ROLE_STORE_OWNER, SEED_ADMIN_ADDRESS, SEED_ADMIN_EMAIL, SEED_ADMIN_NAME, SEED_ADMIN_PASSWORD,
};
use crate::error::DomainError;
use crate::password::Password;
use crate::validation::{validate_email_shape, validate_password};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "System Administrator")]
    Administrator,
    #[serde(rename = "Normal User")]
    NormalUser,
    #[serde(rename = "Store Owner")]
    StoreOwner,
}

impl UserRole {
    /// Human-readable label, also used as the persisted value
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Administrator => ROLE_ADMINISTRATOR,
            UserRole::NormalUser => ROLE_NORMAL_USER,
            UserRole::StoreOwner => ROLE_STORE_OWNER,
        }
    }

    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Administrator)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    /// Accepts the full labels as well as the short forms used on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system administrator" | "administrator" | "admin" => Ok(UserRole::Administrator),
            "normal user" | "normal" | "user" => Ok(UserRole::NormalUser),
            "store owner" | "store-owner" | "owner" => Ok(UserRole::StoreOwner),
            other => Err(DomainError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: UserRole,
    pub password: Password,
}

impl User {
    /// The administrator present when nothing has been persisted yet.
    pub fn seed_admin() -> Self {
        Self {
            id: 1,
            name: SEED_ADMIN_NAME.to_string(),
            email: SEED_ADMIN_EMAIL.to_string(),
            address: SEED_ADMIN_ADDRESS.to_string(),
            role: UserRole::Administrator,
            password: Password::from_stored(SEED_ADMIN_PASSWORD.to_string()),
        }
    }

    /// Case-insensitive email comparison
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// User creation data (signup and the admin add-user form)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    /// Display name, 3-60 characters
    #[validate(length(
        min = MIN_NAME_LENGTH,
        max = MAX_NAME_LENGTH,
        message = "Name must be between 3 and 60 characters"
    ))]
    pub name: String,
    /// Email address, unique across users
    #[validate(custom(function = "validate_email_shape"))]
    pub email: String,
    /// Postal address, at most 400 characters
    #[validate(length(max = MAX_ADDRESS_LENGTH, message = "Address must be max 400 characters"))]
    pub address: String,
    /// Requested role
    pub role: UserRole,
    /// Plaintext password checked against the policy
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        role: UserRole,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
            role,
            password: password.into(),
        }
    }

    /// Trim surrounding whitespace from the text fields (not the password).
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            ..self
        }
    }
}

/// User view without the password, for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: UserRole,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            role: user.role,
        }
    }
}
