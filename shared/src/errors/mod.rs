//! Machine-readable error codes carried in the `error` field of the envelope

/// Common error codes used across the application
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const OTP_INVALID: &str = "OTP_INVALID";
    pub const FILE_MISSING: &str = "FILE_MISSING";
    pub const PROVIDER_ERROR: &str = "PROVIDER_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
