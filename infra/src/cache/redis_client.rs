//! Redis cache client implementation
//!
//! A multiplexed async connection with connect retries and a small set of
//! commands used by the OTP challenge store.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, Script};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use bizreg_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Increments a hash field only while the hash exists, so an expired
/// challenge is never recreated without a TTL. Returns -1 for a missing key.
const HINCR_IF_EXISTS: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return redis.call('HINCRBY', KEYS[1], ARGV[1], 1)
end
return -1
"#;

/// Redis cache client with connection retry
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use bizreg_shared::config::CacheConfig;
    /// use bizreg_infra::cache::RedisClient;
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Create a new Redis client with custom retry configuration
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            max_retries,
            retry_delay_ms,
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Connecting to Redis");

            let result = tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
                .await
                .unwrap_or_else(|_| {
                    Err(RedisError::from((
                        redis::ErrorKind::IoError,
                        "Redis connection timed out",
                    )))
                });

            match result {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries,
                        error = %e,
                        retry_in_ms = delay,
                        "Failed to connect to Redis, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!(attempts, error = %e, "Failed to connect to Redis");
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Namespaced key for this deployment
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Write a hash and set its expiry in one round trip
    pub async fn set_hash_with_expiry(
        &self,
        key: &str,
        fields: &[(&str, String)],
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .hset_multiple(key, fields)
            .ignore()
            .expire(key, expiry_seconds as i64)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Read every field of a hash (empty when the key does not exist)
    pub async fn get_hash(&self, key: &str) -> Result<HashMap<String, String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        Ok(conn.hgetall(key).await?)
    }

    /// Increment a hash field of an existing key
    ///
    /// # Returns
    /// * `Ok(Some(value))` - The new value
    /// * `Ok(None)` - The key does not exist (expired or never written)
    pub async fn increment_hash_field(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<i64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: i64 = Script::new(HINCR_IF_EXISTS)
            .key(key)
            .arg(field)
            .invoke_async(&mut conn)
            .await?;
        Ok((value >= 0).then_some(value))
    }

    /// Delete a key
    ///
    /// # Returns
    /// * `Ok(true)` - The key existed and was deleted
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted: u32 = conn.del(key).await?;
        Ok(deleted > 0)
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let response: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(response == "PONG")
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.find('@'), url.find("://")) {
        return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
    }
    url.to_string()
}
