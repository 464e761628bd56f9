//! Company profile route handlers
//!
//! Every route here sits behind the access gate; handlers read the caller
//! from the `AuthContext` extractor.

pub mod profile;
pub mod register;
pub mod upload;

use actix_web::web;

use bizreg_core::repositories::{CompanyRepository, UserRepository};
use bizreg_core::services::company::ImageHost;
use bizreg_core::services::registration::IdentityProvider;

/// Mount the `/company` routes
pub fn configure<U, I, C, H>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    I: IdentityProvider + 'static,
    C: CompanyRepository + 'static,
    H: ImageHost + 'static,
{
    cfg.service(
        web::scope("/company")
            .route("/register", web::post().to(register::register_company::<U, I, C, H>))
            .route("/profile", web::get().to(profile::get_profile::<U, I, C, H>))
            .route("/profile", web::put().to(profile::update_profile::<U, I, C, H>))
            .route("/upload-logo", web::post().to(upload::upload_logo::<U, I, C, H>))
            .route("/upload-banner", web::post().to(upload::upload_banner::<U, I, C, H>)),
    );
}
