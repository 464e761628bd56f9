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

/// Handler for POST /api/company/register
///
/// Creates the caller's company profile. A user owns at most one profile;
/// a second call answers 409.
pub async fn register_company<U, I, C, H>(
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
        .create(auth.user_id, request.into_details()?)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "Company profile created successfully",
        company,
    )))
}
