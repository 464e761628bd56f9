//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Messages REST resource with HTTP basic
//! authentication. Each message is a single request; any failure is
//! returned to the caller as `InfrastructureError::Sms`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use bizreg_shared::config::SmsConfig;
use bizreg_shared::utils::phone::{is_valid_mobile, mask_phone_number, normalize_phone_number};

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// Twilio's limit for a single message body
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// API root, e.g. `https://api.twilio.com/2010-04-01`
    pub base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&SmsConfig> for TwilioConfig {
    fn from(config: &SmsConfig) -> Self {
        Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() || config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio account SID and auth token are required".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio from number must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.config.base_url, self.config.account_sid
        )
    }

    /// Normalize a recipient to E.164
    pub(crate) fn validate_phone_number(phone: &str) -> Result<String, InfrastructureError> {
        let normalized = normalize_phone_number(phone);
        if !normalized.starts_with('+') || !is_valid_mobile(&normalized) {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
            ));
        }
        Ok(normalized)
    }

    async fn send_message(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(to);

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to),
                ("From", self.config.from_number.as_str()),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(phone = %masked, error = %e, "Twilio request failed");
                InfrastructureError::Sms(format!("Twilio request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(phone = %masked, status = status.as_u16(), "Twilio rejected SMS");
            return Err(InfrastructureError::Sms(format!(
                "Twilio returned {}: {}",
                status, detail
            )));
        }

        let body: MessageResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::Sms(format!("Unreadable Twilio response: {}", e)))?;
        info!(phone = %masked, sid = %body.sid, "SMS sent via Twilio");
        Ok(body.sid)
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let to = Self::validate_phone_number(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_message(&to, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
