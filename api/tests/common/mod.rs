//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use bizreg_api::app::AppState;
use bizreg_core::repositories::{MockCompanyRepository, MockUserRepository};
use bizreg_core::services::company::{CompanyService, CompanyServiceConfig, MockImageHost};
use bizreg_core::services::registration::{
    MockIdentityProvider, RegistrationService, RegistrationServiceConfig,
};
use bizreg_core::services::token::{TokenService, TokenServiceConfig};
use bizreg_shared::ServerConfig;

pub type TestState =
    AppState<MockUserRepository, MockIdentityProvider, MockCompanyRepository, MockImageHost>;

pub const BOUNDARY: &str = "----bizreg-test-boundary";

/// Application state wired to in-memory mocks, plus handles on the mocks
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub server: ServerConfig,
    pub users: Arc<MockUserRepository>,
    pub provider: Arc<MockIdentityProvider>,
    pub companies: Arc<MockCompanyRepository>,
    pub images: Arc<MockImageHost>,
    pub tokens: Arc<TokenService>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MockUserRepository::new());
        let provider = Arc::new(MockIdentityProvider::new());
        let companies = Arc::new(MockCompanyRepository::new());
        let images = Arc::new(MockImageHost::new());
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

        let registration = Arc::new(RegistrationService::new(
            users.clone(),
            provider.clone(),
            tokens.clone(),
            RegistrationServiceConfig {
                bcrypt_cost: 4,
                ..Default::default()
            },
        ));
        let company_service = Arc::new(CompanyService::new(
            companies.clone(),
            images.clone(),
            CompanyServiceConfig::default(),
        ));

        Self {
            state: web::Data::new(AppState::new(registration, company_service, tokens.clone())),
            server: ServerConfig::default(),
            users,
            provider,
            companies,
            images,
            tokens,
        }
    }

    /// `Authorization` header value for a fresh session of `user_id`
    pub fn bearer(&self, user_id: Uuid) -> String {
        let token = self.tokens.issue(user_id, "owner@x.com").unwrap();
        format!("Bearer {}", token)
    }
}

pub fn company_body() -> serde_json::Value {
    serde_json::json!({
        "company_name": "Acme Builders",
        "address": "1 Main St",
        "city": "Pune",
        "state": "MH",
        "country": "India",
        "postal_code": "411001",
        "website": "https://acme.example",
        "industry": "Real Estate"
    })
}

/// Single-file multipart body and its content type
pub fn multipart_file(field: &str, content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{f}\"; filename=\"upload.png\"\r\nContent-Type: {ct}\r\n\r\n",
            b = BOUNDARY,
            f = field,
            ct = content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
