//! Configuration for the verification service

use bizreg_shared::config::OtpConfig;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of digits in a code
    pub code_length: usize,
    /// Number of seconds before a code expires
    pub code_ttl_seconds: u64,
    /// Maximum number of failed attempts allowed per code
    pub max_attempts: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            code_ttl_seconds: 300,
            max_attempts: 3,
        }
    }
}

impl From<&OtpConfig> for VerificationServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            code_ttl_seconds: config.ttl_seconds,
            max_attempts: config.max_attempts,
        }
    }
}
