//! Firebase Identity Toolkit REST client

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use bizreg_shared::config::IdentityConfig;

use super::types::{
    ApplyOobCodeRequest, ApplyOobCodeResponse, AuthResponse, DeleteAccountRequest, ErrorEnvelope,
    PasswordRequest, SendOobCodeRequest,
};
use crate::InfrastructureError;

/// Failure of an Identity Toolkit call
#[derive(Debug, thiserror::Error)]
pub enum FirebaseError {
    /// The API answered with an error code such as `EMAIL_EXISTS`
    #[error("{reason} (HTTP {status})")]
    Api { status: u16, reason: String },

    /// The request never produced a usable answer
    #[error(transparent)]
    Transport(#[from] InfrastructureError),
}

impl FirebaseError {
    /// Whether the API refused an email/password pair
    pub fn is_credential_rejection(&self) -> bool {
        matches!(
            self,
            FirebaseError::Api { reason, .. } if matches!(
                reason.as_str(),
                "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED"
            )
        )
    }
}

/// REST client for the account endpoints of the Identity Toolkit
#[derive(Clone)]
pub struct FirebaseAuthClient {
    client: Client,
    config: IdentityConfig,
}

impl FirebaseAuthClient {
    pub fn new(config: IdentityConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "Identity provider API key is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create an email/password account (`accounts:signUp`)
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, FirebaseError> {
        self.post(
            "accounts:signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Authenticate an email/password pair (`accounts:signInWithPassword`)
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, FirebaseError> {
        self.post(
            "accounts:signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Send the verification email for the account behind `id_token`
    pub async fn send_email_verification(&self, id_token: &str) -> Result<(), FirebaseError> {
        self.post::<_, serde_json::Value>(
            "accounts:sendOobCode",
            &SendOobCodeRequest {
                request_type: "VERIFY_EMAIL",
                id_token,
            },
        )
        .await
        .map(|_| ())
    }

    /// Apply an email action code (`accounts:update` with `oobCode`)
    pub async fn apply_oob_code(&self, oob_code: &str) -> Result<ApplyOobCodeResponse, FirebaseError> {
        self.post("accounts:update", &ApplyOobCodeRequest { oob_code })
            .await
    }

    /// Delete the account behind `id_token`
    pub async fn delete_account(&self, id_token: &str) -> Result<(), FirebaseError> {
        self.post::<_, serde_json::Value>("accounts:delete", &DeleteAccountRequest { id_token })
            .await
            .map(|_| ())
    }

    pub(crate) fn endpoint(&self, method: &str) -> String {
        format!(
            "{}/{}?key={}",
            self.config.base_url.trim_end_matches('/'),
            method,
            self.config.api_key
        )
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R, FirebaseError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(method))
            .json(body)
            .send()
            .await
            .map_err(InfrastructureError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await.map_err(InfrastructureError::from)?);
        }

        let text = response.text().await.map_err(InfrastructureError::from)?;
        Err(parse_api_error(status.as_u16(), &text))
    }
}

/// Turn an error response body into a `FirebaseError::Api`
pub(crate) fn parse_api_error(status: u16, body: &str) -> FirebaseError {
    let reason = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.reason().to_string())
        .unwrap_or_else(|_| "UNKNOWN_ERROR".to_string());
    FirebaseError::Api { status, reason }
}
