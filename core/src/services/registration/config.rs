//! Configuration for the registration service

use bizreg_shared::config::AuthConfig;

/// Configuration for the registration service
#[derive(Debug, Clone)]
pub struct RegistrationServiceConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Minimum accepted password length
    pub password_min_length: usize,
    /// Minimum accepted full name length (characters)
    pub full_name_min_length: usize,
    /// Whether to ask the provider to email a verification link after signup
    pub send_email_verification: bool,
}

impl Default for RegistrationServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            password_min_length: 8,
            full_name_min_length: 2,
            send_email_verification: true,
        }
    }
}

impl From<&AuthConfig> for RegistrationServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            password_min_length: config.password_min_length,
            ..Default::default()
        }
    }
}
