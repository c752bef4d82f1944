//! Daily salt value and generation.

use std::time::Duration;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

/// Number of random bytes in a freshly generated salt.
pub const SALT_BYTE_LEN: usize = 32;

/// Lifetime of a stored daily salt. Expiry is the only removal path.
pub const SALT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Validation errors for [`DailySalt`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailySaltValidationError {
    /// The salt string was empty or whitespace-only.
    #[error("daily salt must not be blank")]
    Blank,
}

/// One calendar day's salt.
///
/// Freshly generated salts are 64 lowercase hex characters (32 bytes of OS
/// randomness). Values read back from the shared store are accepted as
/// opaque non-empty text, since the store is externally owned and its
/// contents are never interpreted. Salts are never mutated once written.
///
/// The type deliberately has no `Display` impl: salts are secret material
/// and must not wander into logs. Serde support exists because the value is
/// written to the store as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DailySalt(String);

impl DailySalt {
    /// Validate and construct a [`DailySalt`] from stored text.
    ///
    /// # Errors
    ///
    /// Returns [`DailySaltValidationError::Blank`] when the input is empty
    /// or whitespace-only. A blank cached value is treated as absent by the
    /// provisioner, never used as a salt.
    pub fn new(value: impl Into<String>) -> Result<Self, DailySaltValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DailySaltValidationError::Blank);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh salt from [`SALT_BYTE_LEN`] bytes of OS randomness.
    ///
    /// The raw bytes are wiped once hex-encoded; only the encoded form
    /// leaves this function.
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_BYTE_LEN];
        OsRng.fill_bytes(&mut bytes);
        let encoded = hex::encode(bytes);
        bytes.zeroize();
        Self(encoded)
    }

    /// Borrow the salt as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DailySalt> for String {
    fn from(value: DailySalt) -> Self {
        value.0
    }
}

impl TryFrom<String> for DailySalt {
    type Error = DailySaltValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
