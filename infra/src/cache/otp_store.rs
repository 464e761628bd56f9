//! Redis store for OTP challenges
//!
//! One hash per phone number under `{prefix}:otp:{phone}` with the fields
//! `code_hash` and `attempts`. The hash expires with the code, so an expired
//! challenge simply reads as absent.

use async_trait::async_trait;

use bizreg_core::services::verification::{CacheServiceTrait, OtpChallenge};
use bizreg_shared::utils::phone::mask_phone_number;

use super::RedisClient;

const CODE_HASH_FIELD: &str = "code_hash";
const ATTEMPTS_FIELD: &str = "attempts";

/// OTP challenge store backed by Redis
#[derive(Clone)]
pub struct OtpRedisStore {
    redis_client: RedisClient,
}

impl OtpRedisStore {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    fn challenge_key(&self, phone: &str) -> String {
        self.redis_client.make_key(&format!("otp:{}", phone))
    }
}

#[async_trait]
impl CacheServiceTrait for OtpRedisStore {
    async fn store_code(&self, phone: &str, code_hash: &str, ttl_seconds: u64) -> Result<(), String> {
        let fields = [
            (CODE_HASH_FIELD, code_hash.to_string()),
            (ATTEMPTS_FIELD, "0".to_string()),
        ];
        self.redis_client
            .set_hash_with_expiry(&self.challenge_key(phone), &fields, ttl_seconds)
            .await
            .map_err(|e| e.to_string())?;

        tracing::debug!(phone = %mask_phone_number(phone), ttl_seconds, "Stored OTP challenge");
        Ok(())
    }

    async fn get_challenge(&self, phone: &str) -> Result<Option<OtpChallenge>, String> {
        let fields = self
            .redis_client
            .get_hash(&self.challenge_key(phone))
            .await
            .map_err(|e| e.to_string())?;

        Ok(challenge_from_fields(&fields))
    }

    async fn increment_attempts(&self, phone: &str) -> Result<u32, String> {
        let attempts = self
            .redis_client
            .increment_hash_field(&self.challenge_key(phone), ATTEMPTS_FIELD)
            .await
            .map_err(|e| e.to_string())?;

        // A challenge that expired between read and increment counts as spent
        Ok(attempts.map(|n| n.clamp(0, u32::MAX as i64) as u32).unwrap_or(u32::MAX))
    }

    async fn clear_verification(&self, phone: &str) -> Result<(), String> {
        self.redis_client
            .delete(&self.challenge_key(phone))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Build a challenge from the stored hash fields
///
/// A hash without `code_hash` is treated as absent; a missing or unreadable
/// attempt counter reads as zero.
pub(crate) fn challenge_from_fields(
    fields: &std::collections::HashMap<String, String>,
) -> Option<OtpChallenge> {
    let code_hash = fields.get(CODE_HASH_FIELD)?.clone();
    let attempts = fields
        .get(ATTEMPTS_FIELD)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0);
    Some(OtpChallenge { code_hash, attempts })
}
