//! SMS Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS using the standard message format
    async fn send_verification_code(&self, phone_number: &str, code: &str) -> Result<String, InfrastructureError> {
        self.send_sms(phone_number, &verification_message(code)).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Text of the verification SMS
pub fn verification_message(code: &str) -> String {
    format!(
        "Your BizReg verification code is: {}. This code will expire in 5 minutes.",
        code
    )
}
