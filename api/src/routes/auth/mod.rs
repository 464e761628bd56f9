//! Authentication route handlers
//!
//! This module contains the account side of onboarding:
//! - Registration and email/password login
//! - Mobile verification and OTP resend
//! - Email verification through the provider's action link

pub mod login;
pub mod register;
pub mod resend_otp;
pub mod verify_email;
pub mod verify_mobile;

use actix_web::web;

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;

/// Mount the `/auth` routes
pub fn configure<U, I, C, H>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register::register::<U, I, C, H>))
            .route("/login", web::post().to(login::login::<U, I, C, H>))
            .route("/verify-email", web::get().to(verify_email::verify_email::<U, I, C, H>))
            .route("/verify-mobile", web::post().to(verify_mobile::verify_mobile::<U, I, C, H>))
            .route("/resend-otp", web::post().to(resend_otp::resend_otp::<U, I, C, H>)),
    );
}
