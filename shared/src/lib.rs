//! Shared utilities and common types for the BizReg server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and layered loading
//! - The response envelope and error codes
//! - Utility functions (email, mobile and OTP validation, log masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, IdentityConfig,
    ImageHostConfig, JwtConfig, LogFormat, LoggingConfig, OtpConfig, ServerConfig, SmsConfig,
    SmsProvider,
};
pub use errors::error_codes;
pub use types::{ApiResponse, HealthResponse};
pub use utils::{phone, validation};
