//! Verification service module for SMS one-time passcodes
//!
//! This module provides the OTP challenge workflow used for mobile
//! verification:
//! - Cryptographically random code generation
//! - Hashed storage with expiry in a challenge store
//! - Attempt counting with a hard limit per code
//! - Delivery through an SMS gateway

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CacheServiceTrait, SmsServiceTrait};
pub use types::{OtpChallenge, SendCodeResult};
