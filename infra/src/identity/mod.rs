//! Identity provider integration (Firebase Identity Toolkit)
//!
//! - `FirebaseAuthClient`: thin REST client for the account endpoints
//! - `FirebaseIdentityProvider`: the core `IdentityProvider`, combining the
//!   REST client for credentials with the OTP challenge service for mobiles

pub mod client;
pub mod provider;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::FirebaseAuthClient;
pub use provider::FirebaseIdentityProvider;
