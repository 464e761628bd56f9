//! # BizReg Core
//!
//! Domain layer for the company-registration portal backend: entities,
//! the registration, verification, token and company services, repository
//! and adapter traits, and the error types shared by every layer above.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, CompanyDetails, CompanyProfile, Gender, ImageKind, ImageUpload, Industry, PublicUser,
    SessionIdentity, SignupType, UploadedImage, User,
};
pub use domain::value_objects::{CompanyRef, LoginResponse, RegisteredAccount};
pub use errors::{
    AuthError, DomainError, DomainResult, ProviderError, TokenError, ValidationError,
};
pub use repositories::{CompanyRepository, UserRepository};
pub use services::{
    CompanyService, IdentityProvider, ImageHost, RegistrationService, TokenService,
    VerificationService,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let err: DomainError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(ImageKind::Banner.as_str(), "banner");
        assert_eq!(Industry::RealEstate.as_str(), "Real Estate");
    }
}
