//! Identity provider integration

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Account handle returned by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAccount {
    /// Provider-side user id
    pub uid: String,
    /// Short-lived provider credential for follow-up calls on this account
    pub id_token: String,
}

/// Trait for the external identity provider (system of record for
/// credentials and phone verification)
///
/// Error contract:
/// * credential rejection on sign-in is `AuthError::InvalidCredentials`
/// * OTP rejection is `AuthError::InvalidOtp`, `OtpExpired` or
///   `OtpAttemptsExceeded`
/// * everything else the provider refuses or fails at is a `ProviderError`
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an email/password account
    async fn register_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount>;

    /// Authenticate an email/password pair
    async fn sign_in_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount>;

    /// Send the provider's email-verification message for an account
    async fn send_email_verification(&self, account: &ProviderAccount) -> DomainResult<()>;

    /// Apply an email-verification action code
    ///
    /// # Returns
    /// The email the code was issued for, when the provider reports it
    async fn apply_email_action_code(&self, action_code: &str) -> DomainResult<Option<String>>;

    /// Delete an account (used to compensate a failed local insert)
    async fn delete_account(&self, account: &ProviderAccount) -> DomainResult<()>;

    /// Issue an OTP challenge to a mobile number
    async fn send_otp(&self, mobile_no: &str) -> DomainResult<()>;

    /// Verify an OTP previously issued to a mobile number
    async fn verify_otp(&self, mobile_no: &str, otp: &str) -> DomainResult<()>;
}
