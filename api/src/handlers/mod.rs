pub mod error;

pub use error::{ApiError, INVALID_TOKEN_MESSAGE};
