//! Request and response bodies of the Identity Toolkit REST API

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Response of `accounts:signUp` and `accounts:signInWithPassword`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub local_id: String,
    pub id_token: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOobCodeRequest<'a> {
    pub request_type: &'a str,
    pub id_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOobCodeRequest<'a> {
    pub oob_code: &'a str,
}

/// Response of `accounts:update` when applying an action code
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOobCodeResponse {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAccountRequest<'a> {
    pub id_token: &'a str,
}

/// Error envelope: `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
}

impl ErrorBody {
    /// The error code without the optional ` : detail` suffix
    /// (e.g. `WEAK_PASSWORD : Password should be at least 6 characters`)
    pub fn reason(&self) -> &str {
        self.message
            .split_once(" : ")
            .map(|(reason, _)| reason)
            .unwrap_or(&self.message)
            .trim()
    }
}
