//! Privacy-preserving visitor identity primitives for analytics ingestion.
//!
//! The ingestion path never stores the raw anonymous identifier a browser
//! sends. Instead it derives a pseudonym from the identifier and a daily
//! rotating salt held in a shared expiring store, bounding how long one
//! visitor stays linkable to the same stored value. This crate provides that
//! derivation plus its supporting pieces: the salt provisioner, the store
//! port and adapters, event deduplication, IP anonymization, and identifier
//! sanitization.

pub mod domain;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
