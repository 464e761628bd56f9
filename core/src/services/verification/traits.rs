//! Traits for SMS and challenge store integration

use async_trait::async_trait;

use super::types::OtpChallenge;

/// Trait for SMS service integration
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send a verification code via SMS, returning the provider message id
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Trait for the store holding pending OTP challenges
#[async_trait]
pub trait CacheServiceTrait: Send + Sync {
    /// Store a code hash for a phone number, replacing any previous challenge
    async fn store_code(&self, phone: &str, code_hash: &str, ttl_seconds: u64) -> Result<(), String>;
    /// Fetch the pending challenge, if one exists and has not expired
    async fn get_challenge(&self, phone: &str) -> Result<Option<OtpChallenge>, String>;
    /// Atomically record an attempt and return the new attempt count.
    ///
    /// A challenge that no longer exists reports `u32::MAX`.
    async fn increment_attempts(&self, phone: &str) -> Result<u32, String>;
    /// Clear verification data for a phone number
    async fn clear_verification(&self, phone: &str) -> Result<(), String>;
}
