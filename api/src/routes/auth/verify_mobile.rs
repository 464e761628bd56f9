use actix_web::{web, HttpResponse};

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::{VerifyMobileRequest, VerifyMobileResponse};
use crate::handlers::ApiError;

/// Handler for POST /api/auth/verify-mobile
///
/// ## Errors
/// - 400: missing field, OTP not six digits, or OTP rejected
/// - 404: no user has this mobile number
pub async fn verify_mobile<U, I, C, H>(
    state: web::Data<AppState<U, I, C, H>>,
    request: web::Json<VerifyMobileRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let user_id = state
        .registration
        .verify_mobile(&request.mobile_no, &request.otp)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Mobile number verified successfully",
        VerifyMobileResponse { user_id },
    )))
}
