use actix_web::{web, HttpResponse};

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;
use bizreg_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::auth::LoginRequest;
use crate::handlers::ApiError;

/// Handler for POST /api/auth/login
///
/// Returns `{token, user}` on success. Unknown email and wrong password both
/// answer 401 "Invalid email or password".
pub async fn login<U, I, C, H>(
    state: web::Data<AppState<U, I, C, H>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    let response = state
        .registration
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Login successful", response)))
}
