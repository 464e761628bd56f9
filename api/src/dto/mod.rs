pub mod auth;
pub mod company;

pub use auth::*;
pub use company::*;
