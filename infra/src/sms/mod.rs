//! SMS Service Module
//!
//! Delivery of mobile verification codes.
//!
//! - **SMS Service Trait**: common interface for providers
//! - **Twilio**: production delivery through the Twilio REST API
//! - **Mock**: logs messages instead of sending them (development)
//! - **Gateway**: bridges any provider to the core `SmsServiceTrait`

pub mod gateway;
pub mod mock_sms;
pub mod sms_service;
pub mod twilio;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use bizreg_shared::config::{SmsConfig, SmsProvider};

pub use gateway::SmsGateway;
pub use mock_sms::MockSmsService;
pub use sms_service::SmsService;
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::InfrastructureError;

/// Create an SMS service based on configuration
///
/// A Twilio configuration that cannot be initialized is an error rather than
/// a silent fallback, so a misconfigured deployment never pretends to send.
pub fn create_sms_service(config: &SmsConfig) -> Result<Arc<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS service; verification codes are only logged");
            Ok(Arc::new(MockSmsService::new()))
        }
        SmsProvider::Twilio => {
            let service = TwilioSmsService::new(TwilioConfig::from(config))?;
            Ok(Arc::new(service))
        }
    }
}
