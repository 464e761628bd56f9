//! Authentication and session configuration

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Session token lifetime in days
    pub token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            token_expiry_days: 90,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Token lifetime in seconds
    pub fn token_expiry_seconds(&self) -> i64 {
        self.token_expiry_days * 86_400
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session token settings
    pub jwt: JwtConfig,

    /// bcrypt work factor for stored password hashes
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: 12,
            password_min_length: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_detected() {
        assert!(JwtConfig::default().is_using_default_secret());
        assert!(!JwtConfig::new("a-real-secret").is_using_default_secret());
    }

    #[test]
    fn test_expiry_seconds() {
        let config = JwtConfig::default();
        assert_eq!(config.token_expiry_seconds(), 90 * 24 * 60 * 60);
    }
}
