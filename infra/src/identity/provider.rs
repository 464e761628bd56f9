//! Core `IdentityProvider` backed by Firebase and the OTP challenge service

use async_trait::async_trait;
use std::sync::Arc;

use bizreg_core::errors::{AuthError, DomainError, DomainResult, ProviderError};
use bizreg_core::services::registration::{IdentityProvider, ProviderAccount};
use bizreg_core::services::verification::{CacheServiceTrait, SmsServiceTrait, VerificationService};

use super::client::{FirebaseAuthClient, FirebaseError};

/// Identity provider adapter
///
/// Credentials live in Firebase. Mobile OTPs are issued and checked by the
/// in-house challenge service (random code, hashed in Redis, SMS delivery).
pub struct FirebaseIdentityProvider<S, C>
where
    S: SmsServiceTrait,
    C: CacheServiceTrait,
{
    client: FirebaseAuthClient,
    verification: Arc<VerificationService<S, C>>,
}

impl<S, C> FirebaseIdentityProvider<S, C>
where
    S: SmsServiceTrait,
    C: CacheServiceTrait,
{
    pub fn new(client: FirebaseAuthClient, verification: Arc<VerificationService<S, C>>) -> Self {
        Self {
            client,
            verification,
        }
    }
}

#[async_trait]
impl<S, C> IdentityProvider for FirebaseIdentityProvider<S, C>
where
    S: SmsServiceTrait + 'static,
    C: CacheServiceTrait + 'static,
{
    async fn register_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount> {
        let response = self
            .client
            .sign_up(email, password)
            .await
            .map_err(identity_error)?;

        Ok(ProviderAccount {
            uid: response.local_id,
            id_token: response.id_token,
        })
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount> {
        match self.client.sign_in_with_password(email, password).await {
            Ok(response) => Ok(ProviderAccount {
                uid: response.local_id,
                id_token: response.id_token,
            }),
            Err(e) if e.is_credential_rejection() => Err(AuthError::InvalidCredentials.into()),
            Err(e) => Err(identity_error(e)),
        }
    }

    async fn send_email_verification(&self, account: &ProviderAccount) -> DomainResult<()> {
        self.client
            .send_email_verification(&account.id_token)
            .await
            .map_err(email_action_error)
    }

    async fn apply_email_action_code(&self, action_code: &str) -> DomainResult<Option<String>> {
        let response = self
            .client
            .apply_oob_code(action_code)
            .await
            .map_err(email_action_error)?;

        if response.email_verified == Some(false) {
            return Err(ProviderError::EmailAction {
                message: "email not marked verified".to_string(),
            }
            .into());
        }

        Ok(response.email)
    }

    async fn delete_account(&self, account: &ProviderAccount) -> DomainResult<()> {
        self.client
            .delete_account(&account.id_token)
            .await
            .map_err(identity_error)
    }

    async fn send_otp(&self, mobile_no: &str) -> DomainResult<()> {
        self.verification
            .send_verification_code(mobile_no)
            .await
            .map(|_| ())
    }

    async fn verify_otp(&self, mobile_no: &str, otp: &str) -> DomainResult<()> {
        self.verification.verify_code(mobile_no, otp).await
    }
}

fn identity_error(error: FirebaseError) -> DomainError {
    tracing::error!(error = %error, "Identity provider call failed");
    ProviderError::Identity {
        message: error.to_string(),
    }
    .into()
}

fn email_action_error(error: FirebaseError) -> DomainError {
    tracing::warn!(error = %error, "Email action rejected by identity provider");
    ProviderError::EmailAction {
        message: error.to_string(),
    }
    .into()
}
