//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Types
// =============================================================================

/// Pet owner account type
pub const USER_TYPE_OWNER: &str = "OWNER";

/// Veterinarian account type
pub const USER_TYPE_VET: &str = "VET";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters accepted as the "special" class of the password policy
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*.?-";

/// Accepted email shape
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
