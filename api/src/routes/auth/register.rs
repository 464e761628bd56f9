use actix_web::{web, HttpResponse};
use validator::Validate;

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/register
///
/// Creates the account with the identity provider and locally, then sends
/// the mobile OTP. No session token is issued; the client verifies the
/// mobile number next.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "a@x.com",
///     "password": "Passw0rd1",
///     "full_name": "Ann",
///     "gender": "f",
///     "mobile_no": "+911234567890"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "message": "User registered successfully. Please verify mobile OTP.",
///     "data": { "user_id": "…", "email": "a@x.com", "full_name": "Ann" }
/// }
/// ```
///
/// ## Errors
/// - 400: missing or malformed field
/// - 409: email or mobile number already registered
/// - 500: identity provider or OTP delivery failure
pub async fn register<U, I, C, H>(
    state: web::Data<AppState<U, I, C, H>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let account = state.registration.register_account(request.into()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        "User registered successfully. Please verify mobile OTP.",
        account,
    )))
}
