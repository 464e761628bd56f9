use actix_web::{web, HttpResponse};
use validator::Validate;

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::company::CompanyRequest;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/company/profile
pub async fn get_profile<U, I, C, H>(
    auth: AuthContext,
    state: web::Data<AppState<U, I, C, H>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let profile = state.companies.get(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Company profile retrieved successfully",
        profile,
    )))
}

/// Handler for PUT /api/company/profile
///
/// Full replace: optional fields left out of the body are cleared. Logo and
/// banner URLs are kept.
pub async fn update_profile<U, I, C, H>(
    auth: AuthContext,
    state: web::Data<AppState<U, I, C, H>>,
    request: web::Json<CompanyRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let company = state
        .companies
        .update(auth.user_id, request.into_details()?)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Company profile updated successfully",
        company,
    )))
}
