//! Port abstraction over the shared expiring key-value store.
//!
//! The salt provisioner and the dedup guard only ever perform key-scoped
//! reads and expiring writes against the externally owned cache. This port
//! captures that narrow contract so adapters (Redis, in-memory) stay
//! interchangeable and services can be exercised against mocks.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::StoreKey;

/// Errors surfaced by expiring store adapters.
///
/// The store is externally owned; the only failure this layer distinguishes
/// is the backend being unreachable for a read or a write. No retry happens
/// at this layer; callers decide whether to retry or degrade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpiringStoreError {
    /// The store could not be reached or the operation failed in transit.
    #[error("shared store unavailable: {message}")]
    Unavailable {
        /// Backend-reported failure detail.
        message: String,
    },
}

impl ExpiringStoreError {
    /// Build an [`ExpiringStoreError::Unavailable`] from any displayable cause.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Key-scoped get/set-with-expiry operations on the shared cache.
///
/// The contract mirrors what the store actually offers: last-write-wins
/// unconditional writes, plus an atomic create-if-absent for callers that
/// need single-writer semantics. Nothing here scans or deletes cluster-wide.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Read the value stored under `key`, if present and unexpired.
    async fn get(&self, key: &StoreKey) -> Result<Option<String>, ExpiringStoreError>;

    /// Unconditionally write `value` under `key`, expiring after `ttl`.
    ///
    /// Concurrent writers race last-write-wins; the store provides no
    /// ordering across them.
    async fn set_with_expiry(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), ExpiringStoreError>;

    /// Atomically write `value` under `key` only when the key is absent.
    ///
    /// Returns `None` when the write landed, or the incumbent value when
    /// another writer got there first. Either way the key holds a live value
    /// afterwards.
    async fn set_if_absent(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: Duration,
    ) -> Result<Option<String>, ExpiringStoreError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Always misses on reads and discards writes, so services depending on the
/// port can be constructed without a backend.
#[derive(Debug, Clone, Default)]
pub struct FixtureExpiringStore;

#[async_trait]
impl ExpiringStore for FixtureExpiringStore {
    async fn get(&self, _key: &StoreKey) -> Result<Option<String>, ExpiringStoreError> {
        Ok(None)
    }

    async fn set_with_expiry(
        &self,
        _key: &StoreKey,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), ExpiringStoreError> {
        Ok(())
    }

    async fn set_if_absent(
        &self,
        _key: &StoreKey,
        _value: &str,
        _ttl: Duration,
    ) -> Result<Option<String>, ExpiringStoreError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_store_always_misses() {
        let store = FixtureExpiringStore;
        let key = StoreKey::new("salt:1").expect("valid key");

        let value = store.get(&key).await.expect("get succeeds");
        assert!(value.is_none(), "fixture store should always miss");
    }

    #[tokio::test]
    async fn fixture_store_discards_writes() {
        let store = FixtureExpiringStore;
        let key = StoreKey::new("salt:2").expect("valid key");

        store
            .set_with_expiry(&key, "abc", Duration::from_secs(60))
            .await
            .expect("write succeeds");
        let value = store.get(&key).await.expect("get succeeds");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn fixture_store_reports_conditional_writes_as_landed() {
        let store = FixtureExpiringStore;
        let key = StoreKey::new("salt:3").expect("valid key");

        let incumbent = store
            .set_if_absent(&key, "abc", Duration::from_secs(60))
            .await
            .expect("write succeeds");
        assert!(incumbent.is_none());
    }

    #[test]
    fn unavailable_constructor_carries_the_message() {
        let err = ExpiringStoreError::unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "shared store unavailable: connection refused"
        );
    }
}
