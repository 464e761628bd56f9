//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - Session token and password hashing configuration
//! - `cache` - Redis configuration for OTP challenges
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `providers` - Identity provider, image host, SMS and OTP settings
//! - `server` - HTTP server, access gate and CORS configuration
//!
//! Configuration is layered: built-in defaults for the detected environment,
//! then `config/default.toml`, then `config/{environment}.toml`, then
//! `BIZREG__*` environment variables (for example `BIZREG__SERVER__PORT`).

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod providers;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use providers::{IdentityConfig, ImageHostConfig, OtpConfig, SmsConfig, SmsProvider};
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "BIZREG";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Identity provider (Firebase) configuration
    pub identity: IdentityConfig,

    /// Image host (Cloudinary) configuration
    pub image_host: ImageHostConfig,

    /// SMS delivery configuration
    pub sms: SmsConfig,

    /// One-time passcode configuration
    pub otp: OtpConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut server = ServerConfig::default();
        if environment.is_development() {
            server.cors = CorsConfig::development();
        }

        Self {
            environment,
            server,
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            identity: IdentityConfig::default(),
            image_host: ImageHostConfig::default(),
            sms: SmsConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load the layered configuration.
    ///
    /// Reads `.env` (if present) before anything else so that the environment
    /// detection and the `BIZREG__*` overrides can come from it.
    ///
    /// # Errors
    /// Returns a `config::ConfigError` when a configuration file is malformed
    /// or a value cannot be deserialized into its field type.
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let environment = Environment::from_env();
        Self::load_from("config", environment)
    }

    /// Load the layered configuration from a specific directory
    pub fn load_from(dir: &str, environment: Environment) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Self::for_environment(environment))?;

        config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(
                config::File::with_name(&format!("{}/{}", dir, environment)).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.protected_prefixes")
                    .with_list_parse_key("server.cors.allowed_origins"),
            )
            .build()?
            .try_deserialize()
    }

    /// Problems that must block startup in the configured environment
    pub fn startup_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.environment.is_production() {
            if self.auth.jwt.is_using_default_secret() {
                violations.push("auth.jwt.secret must be set in production".to_string());
            }
            if !self.identity.is_configured() {
                violations.push("identity.api_key must be set in production".to_string());
            }
            if !self.image_host.is_configured() {
                violations.push("image_host credentials must be set in production".to_string());
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_spec_constants() {
        let config = AppConfig::default();
        assert_eq!(config.auth.jwt.token_expiry_days, 90);
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert_eq!(
            config.server.protected_prefixes,
            vec!["/api/company".to_string(), "/dashboard".to_string()]
        );
    }

    #[test]
    fn test_production_requires_secrets() {
        let config = AppConfig::for_environment(Environment::Production);
        let violations = config.startup_violations();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_development_has_no_violations() {
        let config = AppConfig::for_environment(Environment::Development);
        assert!(config.startup_violations().is_empty());
    }

    #[test]
    fn test_load_from_missing_directory_falls_back_to_defaults() {
        let config = AppConfig::load_from("does-not-exist", Environment::Staging).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.otp.code_length, 6);
    }
}
