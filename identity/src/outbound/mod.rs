//! Outbound adapters for externally owned systems.

pub mod cache;
