//! Validated key type shared by expiring store adapters.
use thiserror::Error;

use crate::domain::day::DayIndex;
use crate::domain::event_kind::EventKind;

/// Key addressing one entry in the shared expiring store.
///
/// The store is externally owned, so keys are kept to a narrow shape:
/// non-empty and free of surrounding whitespace. The two key families this
/// crate writes are `salt:<dayIndex>` and `dedup:<kind>:<eventId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey(String);

impl StoreKey {
    /// Construct a key after validating that it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, StoreKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(StoreKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(StoreKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Key holding the salt for `day`: `salt:<dayIndex>`.
    pub fn daily_salt(day: DayIndex) -> Self {
        Self(format!("salt:{day}"))
    }

    /// Key marking `event_id` as seen for `kind`: `dedup:<kind>:<eventId>`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `event_id` is blank or carries
    /// surrounding whitespace.
    pub fn dedup(kind: EventKind, event_id: &str) -> Result<Self, StoreKeyValidationError> {
        if event_id.trim().is_empty() {
            return Err(StoreKeyValidationError::Empty);
        }
        Self::new(format!("dedup:{kind}:{event_id}"))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`StoreKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("store key must not be empty")]
    Empty,
    /// Key contains leading or trailing whitespace.
    #[error("store key must not contain surrounding whitespace")]
    ContainsWhitespace,
}
