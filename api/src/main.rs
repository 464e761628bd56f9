use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};

use bizreg_api::app::{create_app, AppState};
use bizreg_api::telemetry::init_tracing;
use bizreg_core::services::company::{CompanyService, CompanyServiceConfig};
use bizreg_core::services::registration::{RegistrationService, RegistrationServiceConfig};
use bizreg_core::services::token::{TokenService, TokenServiceConfig};
use bizreg_core::services::verification::{VerificationService, VerificationServiceConfig};
use bizreg_infra::cache::{OtpRedisStore, RedisClient};
use bizreg_infra::database::{DatabasePool, MySqlCompanyRepository, MySqlUserRepository};
use bizreg_infra::identity::{FirebaseAuthClient, FirebaseIdentityProvider};
use bizreg_infra::images::CloudinaryImageHost;
use bizreg_infra::sms::{create_sms_service, SmsGateway};
use bizreg_shared::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(startup_error)?;
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting BizReg API server");

    let violations = config.startup_violations();
    if !violations.is_empty() {
        for violation in &violations {
            tracing::error!(violation = %violation, "Refusing to start");
        }
        return Err(startup_error("invalid configuration for this environment"));
    }
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("Using the default JWT secret; set BIZREG__AUTH__JWT__SECRET");
    }

    // Persistence
    let database = DatabasePool::new(config.database.clone())
        .await
        .map_err(startup_error)?;
    database.run_migrations().await.map_err(startup_error)?;
    database.health_check().await.map_err(startup_error)?;
    tracing::info!(pool = %database.get_statistics(), "Database ready");
    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let company_repository = Arc::new(MySqlCompanyRepository::new(pool));

    // OTP challenges: Redis store + SMS delivery
    let redis = RedisClient::new(config.cache.clone())
        .await
        .map_err(startup_error)?;
    redis.health_check().await.map_err(startup_error)?;
    let otp_store = Arc::new(OtpRedisStore::new(redis));
    let sms = Arc::new(SmsGateway::new(
        create_sms_service(&config.sms).map_err(startup_error)?,
    ));
    tracing::info!(provider = sms.provider_name(), "SMS gateway ready");
    let verification = Arc::new(VerificationService::new(
        sms,
        otp_store,
        VerificationServiceConfig::from(&config.otp),
    ));

    // External providers
    let identity_client =
        FirebaseAuthClient::new(config.identity.clone()).map_err(startup_error)?;
    let identity_provider = Arc::new(FirebaseIdentityProvider::new(identity_client, verification));
    let image_host =
        Arc::new(CloudinaryImageHost::new(config.image_host.clone()).map_err(startup_error)?);

    // Services
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
    let registration = Arc::new(RegistrationService::new(
        user_repository,
        identity_provider,
        Arc::clone(&tokens),
        RegistrationServiceConfig::from(&config.auth),
    ));
    let companies = Arc::new(CompanyService::new(
        company_repository,
        image_host,
        CompanyServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState::new(registration, companies, tokens));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

fn startup_error(error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}
