use actix_web::{web, HttpResponse};

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::VerifyEmailQuery;
use crate::handlers::ApiError;

/// Handler for GET /api/auth/verify-email?oobCode=…&email=…
///
/// Target of the verification link sent by the identity provider.
pub async fn verify_email<U, I, C, H>(
    state: web::Data<AppState<U, I, C, H>>,
    query: web::Query<VerifyEmailQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    state
        .registration
        .confirm_email(&query.oob_code, &query.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Email verified successfully")))
}
