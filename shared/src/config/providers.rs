//! Third-party provider configuration
//!
//! Credentials for the identity provider (Firebase Identity Toolkit), the
//! image host (Cloudinary) and the SMS gateway used to deliver mobile OTPs.

use serde::{Deserialize, Serialize};

/// Identity provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Web API key of the Firebase project
    pub api_key: String,

    /// Identity Toolkit REST base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::from("https://identitytoolkit.googleapis.com/v1"),
            timeout_seconds: 10,
        }
    }
}

impl IdentityConfig {
    /// Whether an API key has been provided
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Image host configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageHostConfig {
    /// Cloudinary cloud name
    pub cloud_name: String,

    /// Cloudinary API key
    pub api_key: String,

    /// Cloudinary API secret used to sign uploads
    pub api_secret: String,

    /// Upload API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            base_url: String::from("https://api.cloudinary.com/v1_1"),
            timeout_seconds: 30,
        }
    }
}

impl ImageHostConfig {
    /// Whether all upload credentials have been provided
    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

/// SMS gateway selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Deliver through the Twilio Messages API
    Twilio,
    /// Log the message instead of sending it (development only)
    Mock,
}

/// SMS delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// Which gateway delivers OTP messages
    pub provider: SmsProvider,

    /// Twilio account SID
    pub account_sid: String,

    /// Twilio auth token
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,

    /// Twilio REST base URL
    pub base_url: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            base_url: String::from("https://api.twilio.com/2010-04-01"),
        }
    }
}

/// One-time passcode configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Number of digits in a code
    pub code_length: usize,

    /// Seconds before an issued code expires
    pub ttl_seconds: u64,

    /// Failed attempts allowed before the code is discarded
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            ttl_seconds: 300,
            max_attempts: 3,
        }
    }
}
