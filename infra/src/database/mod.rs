//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and health checks
//! - Schema migrations embedded from `infra/migrations`
//! - Repository implementations for users and company profiles

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCompanyRepository, MySqlUserRepository};
