//! Cache module for Redis-backed storage
//!
//! Holds the shared Redis client and the OTP challenge store used for
//! mobile verification.

pub mod otp_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use otp_store::OtpRedisStore;
pub use redis_client::RedisClient;
