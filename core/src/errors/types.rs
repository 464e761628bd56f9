//! Domain-specific error types for authentication, tokens, validation and
//! third-party providers.
//!
//! `Display` strings are the user-facing messages; the presentation layer
//! reuses them verbatim in the response envelope.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Access denied. No token provided.")]
    MissingToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired. Please request a new code")]
    OtpExpired,

    #[error("Maximum OTP attempts exceeded. Please request a new code")]
    OtpAttemptsExceeded,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("{field} must be at least {min} characters (got {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Invalid format for {field}")]
    PatternMismatch { field: String },

    #[error("Invalid value for {field}")]
    InvalidValue { field: String },

    #[error("Invalid URL format")]
    InvalidUrl,

    #[error("Only image files are allowed (got {content_type})")]
    InvalidContentType { content_type: String },

    #[error("File too large: {actual} bytes exceeds the {max_bytes} byte limit")]
    FileTooLarge { max_bytes: usize, actual: usize },
}

/// Failures reported by, or while talking to, a third-party provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Identity provider failure: {message}")]
    Identity { message: String },

    #[error("Email verification failed: {message}")]
    EmailAction { message: String },

    #[error("OTP delivery failed: {message}")]
    Otp { message: String },

    #[error("Image host failure: {message}")]
    ImageHost { message: String },
}
