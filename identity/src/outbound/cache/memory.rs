//! In-memory expiring store with clock-driven expiry.
//!
//! Backs tests and local development: entries expire against an injected
//! clock, so tests advance time instead of sleeping. Not intended for
//! multi-process deployments; the shared store in production is Redis.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{ExpiringStore, ExpiringStoreError, StoreKey};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Expiring store held in process memory.
pub struct MemoryStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn deadline(&self, ttl: Duration) -> Result<DateTime<Utc>, ExpiringStoreError> {
        let delta = TimeDelta::from_std(ttl)
            .map_err(|err| ExpiringStoreError::unavailable(err.to_string()))?;
        Ok(self.clock.utc() + delta)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, ExpiringStoreError> {
        self.entries
            .lock()
            .map_err(|_| ExpiringStoreError::unavailable("store mutex poisoned"))
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.lock().map(|entries| entries.len()).unwrap_or(0);
        f.debug_struct("MemoryStore").field("entries", &count).finish()
    }
}

#[async_trait]
impl ExpiringStore for MemoryStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<String>, ExpiringStoreError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        match entries.get(key.as_str()) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key.as_str());
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_expiry(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), ExpiringStoreError> {
        let expires_at = self.deadline(ttl)?;
        let mut entries = self.lock()?;
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn set_if_absent(
        &self,
        key: &StoreKey,
        value: &str,
        ttl: Duration,
    ) -> Result<Option<String>, ExpiringStoreError> {
        let now = self.clock.utc();
        let expires_at = self.deadline(ttl)?;
        let mut entries = self.lock()?;
        if let Some(entry) = entries.get(key.as_str()) {
            if entry.is_live(now) {
                return Ok(Some(entry.value.clone()));
            }
        }
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(None)
    }
}
