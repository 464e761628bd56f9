//! Company profile module
//!
//! One profile per user: create, read, full-replace update, and logo/banner
//! uploads through an external image host.

mod config;
mod service;
mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use config::CompanyServiceConfig;
pub use service::CompanyService;
pub use traits::ImageHost;

#[cfg(any(test, feature = "testing"))]
pub use mock::MockImageHost;
