//! Domain value types, services, and ports.
//!
//! Purpose: define the strongly typed privacy primitives the ingestion path
//! consumes. Types are immutable once constructed; invariants and
//! serialisation contracts (serde) live in each type's Rustdoc.
//!
//! Public surface:
//! - [`DayIndex`] — calendar-day partitioning for salt rotation.
//! - [`DailySalt`] — one day's salt value and its generation.
//! - [`Pseudonym`] / [`pseudonymize`] — one-way identifier derivation.
//! - [`SaltProvisioner`] — one logical salt per day against the store.
//! - [`DedupGuard`] / [`EventKind`] — replay suppression for event ids.
//! - [`anonymize_ip`] — short deterministic digests for IP addresses.
//! - [`sanitize_string`] and friends — identifier sanitization.
//! - [`ports`] — the shared-store boundary.

pub mod day;
pub mod dedup;
pub mod event_kind;
pub mod ip;
pub mod ports;
pub mod pseudonym;
pub mod salt;
pub mod salt_service;
pub mod sanitize;

pub use self::day::{DayIndex, MILLIS_PER_DAY};
pub use self::dedup::{DEDUP_TTL, DedupError, DedupGuard};
pub use self::event_kind::{EventKind, ParseEventKindError};
pub use self::ip::anonymize_ip;
pub use self::pseudonym::{Pseudonym, PseudonymValidationError, pseudonymize};
pub use self::salt::{DailySalt, DailySaltValidationError, SALT_BYTE_LEN, SALT_TTL};
pub use self::salt_service::SaltProvisioner;
pub use self::sanitize::{
    SESSION_ID_MAX_LENGTH, SHORT_STRING_MAX_LENGTH, STRING_MAX_LENGTH, sanitize_string,
    validate_session_id,
};
