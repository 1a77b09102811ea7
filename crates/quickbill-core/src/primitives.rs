//! # Registration Primitives
//!
//! Hardcoded constants for the QuickBill registration workflow.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// Path of the registration endpoint, relative to the backend base URL.
pub const REGISTER_PATH: &str = "/auth/register";

/// Route the client navigates to after a successful registration.
pub const LOGIN_ROUTE: &str = "/login";

/// Notification shown for transport and parse failures.
///
/// The underlying cause is logged, never shown.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// Message the server returns when an account is created.
pub const REGISTERED_MESSAGE: &str = "Registered successfully";

/// Message the server returns for a duplicate email.
pub const EMAIL_TAKEN_MESSAGE: &str = "Email already registered";

/// Message the server returns when storage fails.
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length in bytes of any transmitted field value.
pub const MAX_FIELD_LENGTH: usize = 256;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 3;

/// Number of wizard steps.
pub const STEP_COUNT: u8 = 3;
