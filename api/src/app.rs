//! Application state and factory
//!
//! This module holds the shared services handed to every handler and builds
//! the Actix-web application: middleware, extractor configuration and routes.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::{CompanyService, ImageHost};
use bizreg_core::services::registration::{IdentityProvider, RegistrationService};
use bizreg_core::services::token::TokenService;
use bizreg_shared::{error_codes, ApiResponse, HealthResponse, ServerConfig};

use crate::handlers::error::{json_error_handler, query_error_handler};
use crate::middleware::{create_cors, AccessGate};
use crate::routes;

/// Services shared by all handlers
pub struct AppState<U, I, C, H>
where
    U: UserRepository,
    I: IdentityProvider,
    C: CompanyRepository,
    H: ImageHost,
{
    pub registration: Arc<RegistrationService<U, I>>,
    pub companies: Arc<CompanyService<C, H>>,
    pub tokens: Arc<TokenService>,
}

impl<U, I, C, H> AppState<U, I, C, H>
where
    U: UserRepository,
    I: IdentityProvider,
    C: CompanyRepository,
    H: ImageHost,
{
    pub fn new(
        registration: Arc<RegistrationService<U, I>>,
        companies: Arc<CompanyService<C, H>>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            registration,
            companies,
            tokens,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, I, C, H>(
    app_state: web::Data<AppState<U, I, C, H>>,
    server: &ServerConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let gate = AccessGate::new(
        Arc::clone(&app_state.tokens),
        server.protected_prefixes.clone(),
    );
    let cors = create_cors(&server.cors);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Order matters: the last wrap runs first
        .wrap(gate)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .configure(routes::auth::configure::<U, I, C, H>)
                .configure(routes::company::configure::<U, I, C, H>),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "bizreg-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error(
        "The requested resource was not found",
        error_codes::NOT_FOUND,
    ))
}
