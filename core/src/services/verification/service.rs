//! Main verification service implementation

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use bizreg_shared::utils::phone::mask_phone_number;

use crate::errors::{AuthError, DomainError, DomainResult, ProviderError};

use super::config::VerificationServiceConfig;
use super::traits::{CacheServiceTrait, SmsServiceTrait};
use super::types::SendCodeResult;

/// Verification service for SMS one-time passcodes
///
/// Only a hash of each code is stored. A code is consumed by the first
/// successful verification and discarded once `max_attempts` failures have
/// been recorded against it.
pub struct VerificationService<S: SmsServiceTrait, C: CacheServiceTrait> {
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Store for pending challenges
    cache_service: Arc<C>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<S: SmsServiceTrait, C: CacheServiceTrait> VerificationService<S, C> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS service implementation
    /// * `cache_service` - Challenge store implementation
    /// * `config` - Service configuration
    pub fn new(
        sms_service: Arc<S>,
        cache_service: Arc<C>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            sms_service,
            cache_service,
            config,
        }
    }

    /// Issue a new code to a phone number
    ///
    /// This method:
    /// 1. Invalidates any previous code for the number
    /// 2. Generates a new code with a CSPRNG
    /// 3. Stores its hash with the configured TTL
    /// 4. Sends the code via SMS
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Message id and code expiry
    /// * `Err(DomainError::Internal)` - The challenge store failed
    /// * `Err(ProviderError::Otp)` - SMS delivery failed
    pub async fn send_verification_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let masked = mask_phone_number(phone);

        self.cache_service
            .clear_verification(phone)
            .await
            .map_err(|e| store_error("invalidate previous codes", &masked, e))?;

        let code = Self::generate_secure_code(self.config.code_length);
        let code_hash = Self::hash_code(phone, &code);

        self.cache_service
            .store_code(phone, &code_hash, self.config.code_ttl_seconds)
            .await
            .map_err(|e| store_error("store verification code", &masked, e))?;

        tracing::info!(phone = %masked, event = "otp_generated", "Generated new verification code");

        let message_id = self
            .sms_service
            .send_verification_code(phone, &code)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Provider(ProviderError::Otp { message: e })
            })?;

        Ok(SendCodeResult {
            message_id,
            expires_at: Utc::now() + Duration::seconds(self.config.code_ttl_seconds as i64),
        })
    }

    /// Verify a code against the pending challenge
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Code matched; the challenge is consumed
    /// * `Err(AuthError::OtpExpired)` - No pending challenge (never issued,
    ///   expired or already consumed)
    /// * `Err(AuthError::InvalidOtp)` - Code did not match
    /// * `Err(AuthError::OtpAttemptsExceeded)` - Attempt limit reached; the
    ///   challenge is discarded
    pub async fn verify_code(&self, phone: &str, code: &str) -> DomainResult<()> {
        let masked = mask_phone_number(phone);

        let challenge = self
            .cache_service
            .get_challenge(phone)
            .await
            .map_err(|e| store_error("load verification code", &masked, e))?
            .ok_or(DomainError::Auth(AuthError::OtpExpired))?;

        // Every guess consumes an attempt before it is compared
        let attempts = self
            .cache_service
            .increment_attempts(phone)
            .await
            .map_err(|e| store_error("record attempt", &masked, e))?;

        if attempts > self.config.max_attempts {
            tracing::warn!(
                phone = %masked,
                attempts = attempts,
                event = "otp_attempts_exceeded",
                "Verification attempt limit reached"
            );
            self.discard(phone, &masked).await;
            return Err(AuthError::OtpAttemptsExceeded.into());
        }

        let provided_hash = Self::hash_code(phone, code);
        if constant_time_eq(provided_hash.as_bytes(), challenge.code_hash.as_bytes()) {
            self.discard(phone, &masked).await;
            tracing::info!(phone = %masked, event = "otp_verified_success", "Verification code verified");
            return Ok(());
        }

        tracing::warn!(
            phone = %masked,
            attempts = attempts,
            event = "otp_verification_failed",
            "Verification code did not match"
        );

        if attempts >= self.config.max_attempts {
            self.discard(phone, &masked).await;
            return Err(AuthError::OtpAttemptsExceeded.into());
        }

        Err(AuthError::InvalidOtp.into())
    }

    /// Generate a cryptographically secure numeric code of `length` digits
    pub fn generate_secure_code(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| {
                // Rejection sampling keeps every digit uniform
                loop {
                    let byte = (rng.next_u32() & 0xFF) as u8;
                    if byte < 250 {
                        return char::from(b'0' + byte % 10);
                    }
                }
            })
            .collect()
    }

    /// Hash a code together with its phone number
    pub fn hash_code(phone: &str, code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(phone.as_bytes());
        hasher.update(b":");
        hasher.update(code.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn discard(&self, phone: &str, masked: &str) {
        if let Err(e) = self.cache_service.clear_verification(phone).await {
            tracing::warn!(phone = %masked, error = %e, "Failed to clear verification code");
        }
    }
}

fn store_error(action: &str, masked_phone: &str, error: String) -> DomainError {
    tracing::error!(
        phone = %masked_phone,
        error = %error,
        event = "otp_store_failed",
        "Failed to {}",
        action
    );
    DomainError::Internal {
        message: format!("Failed to {}: {}", action, error),
    }
}
