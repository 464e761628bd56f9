//! Bridge from infrastructure SMS providers to the core verification service

use async_trait::async_trait;
use std::sync::Arc;

use bizreg_core::services::verification::SmsServiceTrait;

use super::SmsService;

/// Adapter implementing the core `SmsServiceTrait` for any configured provider
#[derive(Clone)]
pub struct SmsGateway {
    inner: Arc<dyn SmsService>,
}

impl SmsGateway {
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsGateway {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code)
            .await
            .map_err(|e| e.to_string())
    }
}
