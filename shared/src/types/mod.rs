//! Type definitions shared by the API surface
//!
//! - `response` - the JSON envelope every endpoint answers with

pub mod response;

pub use response::{ApiResponse, HealthResponse};
