//! Shared store adapters.
//!
//! [`RedisStore`] is the production adapter: a pooled Redis client issuing
//! key-scoped `GET`, `SETEX`, and `SET NX GET` commands. [`MemoryStore`]
//! backs tests and local development with clock-driven expiry.

mod memory;
mod settings;

pub use memory::MemoryStore;
pub use settings::{CacheSettings, CacheSettingsError};

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::{AsyncCommands, ExistenceCheck, SetExpiry, SetOptions};

use crate::domain::ports::{ExpiringStore, ExpiringStoreError, StoreKey};

/// Expiring store backed by a pooled Redis connection.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisStore {
    /// Connect a pool according to `settings`.
    ///
    /// # Errors
    ///
    /// Returns a store-unavailable error when the URL is rejected or the
    /// pool cannot be built.
    pub async fn connect(settings: &CacheSettings) -> Result<Self, ExpiringStoreError> {
        let manager = RedisConnectionManager::new(settings.url.as_str())
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(settings.pool_size)
            .build(manager)
            .await
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn new(pool: Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, ExpiringStoreError> {
        self.pool
            .get()
            .await
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))
    }
}

#[async_trait]
impl ExpiringStore for RedisStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<String>, ExpiringStoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key.as_str())
            .await
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        Ok(value)
    }

    async fn set_with_expiry(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: std::time::Duration,
    ) -> Result<(), ExpiringStoreError> {
        let mut conn = self.connection().await?;
        let () = conn
            .set_ex(key.as_str(), value, ttl.as_secs())
            .await
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: std::time::Duration,
    ) -> Result<Option<String>, ExpiringStoreError> {
        let mut conn = self.connection().await?;
        // SET ... NX GET: returns the incumbent value when the key is
        // already held, nil when this write landed.
        let options = SetOptions::default()
            .conditional_set(ExistenceCheck::NX)
            .get(true)
            .with_expiration(SetExpiry::EX(ttl.as_secs()));
        let incumbent: Option<String> = conn
            .set_options(key.as_str(), value, options)
            .await
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        Ok(incumbent)
    }
}
