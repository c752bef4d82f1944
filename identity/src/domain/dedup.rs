//! Event deduplication against the shared store.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::event_kind::EventKind;
use super::ports::{ExpiringStore, ExpiringStoreError, StoreKey};
use super::sanitize::{SHORT_STRING_MAX_LENGTH, sanitize_string};

/// How long a seen event id blocks replays.
pub const DEDUP_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors raised by the dedup guard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DedupError {
    /// The event id was empty after sanitization.
    #[error("event id must not be blank")]
    BlankEventId,
    /// The shared store could not be reached.
    #[error(transparent)]
    Store(#[from] ExpiringStoreError),
}

/// Suppresses replayed event ids per event kind.
///
/// Markers live under `dedup:<kind>:<eventId>` with a 24 hour lifetime, so a
/// retried delivery within that window is recognised and dropped while the
/// same id resurfacing days later is admitted again.
#[derive(Clone)]
pub struct DedupGuard<S> {
    store: Arc<S>,
}

impl<S> DedupGuard<S> {
    /// Create a guard over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> DedupGuard<S>
where
    S: ExpiringStore,
{
    /// Report whether `event_id` was already seen for `kind`, marking it
    /// seen either way.
    ///
    /// The first sighting writes the marker and returns `false`; replays
    /// within the marker's lifetime return `true`. Marking is a single
    /// atomic create-if-absent, so two racing sightings of one id admit
    /// exactly one.
    ///
    /// # Errors
    ///
    /// [`DedupError::BlankEventId`] when the id sanitizes to nothing;
    /// store failures propagate as [`DedupError::Store`].
    pub async fn check_and_mark(
        &self,
        kind: EventKind,
        event_id: &str,
    ) -> Result<bool, DedupError> {
        let id = sanitize_string(event_id, SHORT_STRING_MAX_LENGTH);
        let key = StoreKey::dedup(kind, &id).map_err(|_| DedupError::BlankEventId)?;
        let incumbent = self.store.set_if_absent(&key, "1", DEDUP_TTL).await?;
        let duplicate = incumbent.is_some();
        if duplicate {
            debug!(kind = %kind, "dropped replayed event id");
        }
        Ok(duplicate)
    }
}
