use actix_web::{web, HttpResponse};

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::ResendOtpRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/resend-otp
///
/// Issues a fresh OTP to a registered, not yet verified mobile number.
pub async fn resend_otp<U, I, C, H>(
    state: web::Data<AppState<U, I, C, H>>,
    request: web::Json<ResendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    state.registration.resend_otp(&request.mobile_no).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("OTP sent successfully")))
}
