//! Token service module for session JWT management
//!
//! This module handles all session token operations:
//! - HS256 session token issuance with a fixed lifetime
//! - Fail-closed verification against an injectable clock

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
