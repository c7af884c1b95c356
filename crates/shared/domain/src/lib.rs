//! Domain layer - Core business entities and value objects.
//!
//! Users, stores and ratings for the store-rating platform, together with the
//! field rules they are checked against. This crate has no storage concerns.

pub mod constants;
pub mod error;
pub mod password;
pub mod store;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use store::{Rating, Store, StoreFilter};
pub use user::{NewUser, User, UserResponse, UserRole};
