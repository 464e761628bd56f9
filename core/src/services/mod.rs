//! Business services containing domain logic and use cases.

pub mod company;
pub mod registration;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use company::{CompanyService, CompanyServiceConfig, ImageHost};
pub use registration::{
    IdentityProvider, ProviderAccount, RegisterAccountInput, RegistrationService,
    RegistrationServiceConfig,
};
pub use token::{Clock, FixedClock, SystemClock, TokenService, TokenServiceConfig};
pub use verification::{
    CacheServiceTrait, OtpChallenge, SendCodeResult, SmsServiceTrait, VerificationService,
    VerificationServiceConfig,
};

#[cfg(any(test, feature = "testing"))]
pub use company::MockImageHost;
#[cfg(any(test, feature = "testing"))]
pub use registration::MockIdentityProvider;
