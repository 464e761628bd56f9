//! Registration workflow module
//!
//! This module drives the account side of onboarding:
//! - Account creation against the identity provider and the credential store
//! - Mobile verification through OTP
//! - Email confirmation through provider action codes
//! - Email/password login issuing a session token

mod config;
mod password;
mod service;
mod traits;
mod types;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use config::RegistrationServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::RegistrationService;
pub use traits::{IdentityProvider, ProviderAccount};
pub use types::RegisterAccountInput;

#[cfg(any(test, feature = "testing"))]
pub use mock::MockIdentityProvider;
