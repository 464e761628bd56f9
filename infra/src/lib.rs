//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and adapter traits for
//! the BizReg backend.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx, plus migrations
//! - **Cache**: Redis client and the OTP challenge store
//! - **SMS**: Twilio delivery of one-time passcodes, and a logging mock
//! - **Identity**: Firebase Identity Toolkit REST client and provider adapter
//! - **Images**: Cloudinary signed uploads

pub mod cache;
pub mod database;
pub mod identity;
pub mod images;
pub mod sms;

use bizreg_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Image host rejected an upload
    #[error("Image host error: {0}")]
    ImageHost(String),

    /// Stored data could not be mapped to a domain value
    #[error("Data mapping error: {0}")]
    Mapping(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
