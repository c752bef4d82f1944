//! Daily salt provisioning against the shared store.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use super::day::DayIndex;
use super::ports::{ExpiringStore, ExpiringStoreError, StoreKey};
use super::pseudonym::{Pseudonym, pseudonymize};
use super::salt::{DailySalt, SALT_TTL};

/// Guarantees one logical salt per calendar day, shared across callers.
///
/// The store handle and the clock are injected so tests can substitute a
/// mock store and travel across day boundaries.
#[derive(Clone)]
pub struct SaltProvisioner<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SaltProvisioner<S> {
    /// Create a provisioner over the given store and clock.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

impl<S> SaltProvisioner<S>
where
    S: ExpiringStore,
{
    /// Current day index according to the injected clock.
    pub fn today(&self) -> DayIndex {
        DayIndex::current(self.clock.as_ref())
    }

    /// Return the active salt for today, creating one on first request.
    ///
    /// The read-then-write sequence takes no lock: two callers racing on the
    /// first request of a new day may each generate a candidate and both
    /// write it. The store is last-write-wins, so the racing callers may
    /// briefly hold different salts before the store converges on whichever
    /// write landed last. Identifiers derived from either transient value
    /// stay internally consistent for that caller's request. Use
    /// [`daily_salt_exclusive`](Self::daily_salt_exclusive) when immediate
    /// convergence matters.
    ///
    /// A blank cached value counts as absent and is regenerated.
    ///
    /// # Errors
    ///
    /// Store failures propagate untouched; no retry happens here.
    pub async fn daily_salt(&self) -> Result<DailySalt, ExpiringStoreError> {
        let day = self.today();
        let key = StoreKey::daily_salt(day);
        if let Some(existing) = self.store.get(&key).await? {
            if let Ok(salt) = DailySalt::new(existing) {
                return Ok(salt);
            }
        }
        let fresh = DailySalt::generate();
        self.store
            .set_with_expiry(&key, fresh.as_str(), SALT_TTL)
            .await?;
        debug!(day = day.as_i64(), "provisioned daily salt");
        Ok(fresh)
    }

    /// Return the active salt for today with single-writer semantics.
    ///
    /// On a miss the generated candidate is written with an atomic
    /// create-if-absent; when another caller's write is already in place,
    /// the incumbent value is adopted and the candidate discarded, so every
    /// caller converges on one salt immediately.
    ///
    /// # Errors
    ///
    /// Store failures propagate untouched; no retry happens here.
    pub async fn daily_salt_exclusive(&self) -> Result<DailySalt, ExpiringStoreError> {
        let day = self.today();
        let key = StoreKey::daily_salt(day);
        if let Some(existing) = self.store.get(&key).await? {
            if let Ok(salt) = DailySalt::new(existing) {
                return Ok(salt);
            }
        }
        let candidate = DailySalt::generate();
        match self
            .store
            .set_if_absent(&key, candidate.as_str(), SALT_TTL)
            .await?
        {
            None => {
                debug!(day = day.as_i64(), "provisioned daily salt");
                Ok(candidate)
            }
            Some(incumbent) => {
                if let Ok(salt) = DailySalt::new(incumbent) {
                    return Ok(salt);
                }
                // Incumbent was blank; replace it rather than adopt it.
                self.store
                    .set_with_expiry(&key, candidate.as_str(), SALT_TTL)
                    .await?;
                Ok(candidate)
            }
        }
    }

    /// Derive today's pseudonym for `anonymous_id`.
    ///
    /// Fetches the daily salt (provisioning it if absent) and hashes the
    /// identifier with it. For a fixed identifier the result is stable
    /// within a calendar day and rotates with the salt the next day.
    ///
    /// # Errors
    ///
    /// Store failures propagate untouched; no retry happens here.
    pub async fn pseudonymize(&self, anonymous_id: &str) -> Result<Pseudonym, ExpiringStoreError> {
        let salt = self.daily_salt().await?;
        Ok(pseudonymize(anonymous_id, &salt))
    }
}

#[cfg(test)]
#[path = "salt_service_tests.rs"]
mod tests;
