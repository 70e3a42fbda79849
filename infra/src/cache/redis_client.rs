//! Redis cache client implementation
//!
//! A single multiplexed connection with retry logic and a per-command
//! deadline. Every command, retries included, either answers within
//! `CacheConfig::response_timeout_ms` or fails with
//! `InfrastructureError::Timeout`, so callers never hang on a stalled Redis.
//!
//! Keys can embed bearer tokens, so logs only ever show a key's namespace.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout, timeout_at, Instant};
use tracing::{debug, error, info, warn};

use super::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with connection reuse and retry logic
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
    /// Maximum number of attempts for one operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect to the Redis server named by `config.url`
    ///
    /// # Example
    /// ```no_run
    /// use ms_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn connect() -> Result<RedisClient, ms_infra::InfrastructureError> {
    ///     RedisClient::new(CacheConfig::new("redis://localhost:6379")).await
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        Self::new_with_retry_config(config, 3, 100).await
    }

    /// Connect with a custom retry policy
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        info!(
            "Creating Redis client with URL: {} (response timeout {}ms)",
            mask_url(&config.url),
            config.response_timeout_ms
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout),
            max_retries.max(1),
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries: max_retries.max(1),
            retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let err = match timeout(connect_timeout, client.get_multiplexed_async_connection()).await
            {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) => InfrastructureError::Cache(e),
                Err(_) => InfrastructureError::Timeout(format!(
                    "connecting to Redis took longer than {:?}",
                    connect_timeout
                )),
            };

            if attempts >= max_retries {
                error!("Failed to connect to Redis after {} attempts: {}", attempts, err);
                return Err(err);
            }

            warn!(
                "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                attempts, max_retries, err, delay
            );
            sleep(Duration::from_millis(delay)).await;
            delay = (delay * 2).min(5000);
        }
    }

    /// Key with the configured prefix applied
    pub fn key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Set a value that expires after `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let key = self.key(key);
        let label = key_label(&key);
        debug!("Setting key '{}' with expiry {}s", label, expiry_seconds);

        let value = value.to_string();
        self.execute_with_retry("SETEX", |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", label, e);
            e
        })
    }

    /// Get a value, `None` when the key is absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = self.key(key);
        let label = key_label(&key);
        debug!("Getting key '{}'", label);

        self.execute_with_retry("GET", |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", label, e);
            e
        })
    }

    /// Delete a key; `true` when something was removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = self.key(key);
        let label = key_label(&key);
        debug!("Deleting key '{}'", label);

        let deleted = self
            .execute_with_retry("DEL", |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await
            .map_err(|e| {
                error!("Failed to delete key '{}': {}", label, e);
                e
            })?;

        Ok(deleted > 0)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        let key = self.key(key);

        self.execute_with_retry("EXISTS", |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to check key '{}' existence: {}", key_label(&key), e);
            e
        })
    }

    /// Remaining TTL in seconds, `None` if the key is missing or never expires
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let key = self.key(key);

        let ttl = self
            .execute_with_retry("TTL", |mut conn| {
                let key = key.clone();
                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await?;

        Ok((ttl >= 0).then_some(ttl))
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let response = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await
            .map_err(|e| {
                error!("Redis health check failed: {}", e);
                e
            })?;

        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
            return Ok(false);
        }
        Ok(true)
    }

    /// Run one command on the shared connection, see [`retry_within`]
    async fn execute_with_retry<F, T>(
        &self,
        command: &str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        retry_within(
            command,
            Duration::from_millis(self.config.response_timeout_ms),
            self.max_retries,
            self.retry_delay_ms,
            || operation(self.connection.clone()),
        )
        .await
    }
}

/// Run `operation`, retrying transient failures, all within `budget`
///
/// Every attempt and every backoff sleep count against the same deadline.
/// A retry that could not start before the deadline is not attempted and
/// the last error is returned instead.
pub(crate) async fn retry_within<F, Fut, T>(
    command: &str,
    budget: Duration,
    max_retries: u32,
    retry_delay_ms: u64,
    mut operation: F,
) -> Result<T, InfrastructureError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let deadline = Instant::now() + budget;
    let mut attempts = 0;
    let mut delay = retry_delay_ms;

    loop {
        attempts += 1;

        match timeout_at(deadline, operation()).await {
            Ok(Ok(result)) => return Ok(result),
            Ok(Err(e))
                if attempts < max_retries
                    && is_retriable_error(&e)
                    && Instant::now() + Duration::from_millis(delay) < deadline =>
            {
                warn!(
                    "Redis {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                    command, attempts, max_retries, e, delay
                );
                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(5000);
            }
            Ok(Err(e)) => return Err(InfrastructureError::Cache(e)),
            Err(_) => {
                warn!("Redis {} did not answer within {:?}", command, budget);
                return Err(InfrastructureError::Timeout(format!(
                    "Redis {} exceeded {}ms",
                    command,
                    budget.as_millis()
                )));
            }
        }
    }
}

/// Whether a Redis error is transient and the command may be retried
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Loggable form of a key: its namespace with the last segment hidden
///
/// `blacklist:access_token:<jwt>` becomes `blacklist:access_token:*`.
pub(crate) fn key_label(key: &str) -> String {
    match key.rfind(':') {
        Some(pos) => format!("{}:*", &key[..pos]),
        None => "*".to_string(),
    }
}

/// Hide credentials in a Redis URL before logging it
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(proto_end), Some(at_pos)) if at_pos > proto_end => {
            format!("{}****{}", &url[..proto_end + 3], &url[at_pos..])
        }
        _ => url.to_string(),
    }
}
