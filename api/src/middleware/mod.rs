pub mod auth;
pub mod cors;

pub use auth::{AccessGate, AuthContext};
pub use cors::create_cors;
