//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Label for the administrator role
pub const ROLE_ADMINISTRATOR: &str = "System Administrator";

/// Label for the normal (shopper) role
pub const ROLE_NORMAL_USER: &str = "Normal User";

/// Label for the store owner role
pub const ROLE_STORE_OWNER: &str = "Store Owner";

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length (after trimming)
pub const MIN_NAME_LENGTH: u64 = 3;

/// Maximum name length
pub const MAX_NAME_LENGTH: u64 = 60;

/// Maximum address length
pub const MAX_ADDRESS_LENGTH: u64 = 400;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 16;

/// Symbols accepted as the password's special character
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

// =============================================================================
// Persistence
// =============================================================================

/// Storage key for the users collection
pub const USERS_KEY: &str = "sr_users";

/// Storage key for the stores collection
pub const STORES_KEY: &str = "sr_stores";

/// Storage key for the ratings collection
pub const RATINGS_KEY: &str = "sr_ratings";

// =============================================================================
// Seed Data
// =============================================================================

/// Name of the administrator created when nothing is persisted yet
pub const SEED_ADMIN_NAME: &str = "R.K. Administrator";

/// Email of the seeded administrator
pub const SEED_ADMIN_EMAIL: &str = "RKADD@gmail.com";

/// Address of the seeded administrator
pub const SEED_ADMIN_ADDRESS: &str = "123 Admin Way";

/// Password of the seeded administrator
pub const SEED_ADMIN_PASSWORD: &str = "RKADD@147852369";

/// Placeholder shown for a rating whose author no longer exists
pub const UNKNOWN_RATER_NAME: &str = "Unknown User";

/// Placeholder shown for a store without ratings
pub const NO_RATING_LABEL: &str = "N/A";
