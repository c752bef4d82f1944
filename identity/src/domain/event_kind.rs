//! Event kind discriminators for deduplication scoping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of inbound event being deduplicated.
///
/// Each variant corresponds to an ingestion payload family with its own
/// event-id namespace. The discriminator keeps dedup markers isolated per
/// kind, so the same id arriving as a pageview and as an error report counts
/// as two distinct sightings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Pageview and analytics track events.
    Track,
    /// Client error reports.
    Error,
    /// Web vitals metric samples.
    WebVitals,
    /// Outgoing link clicks.
    OutgoingLink,
    /// Caller-defined custom events.
    Custom,
}

impl EventKind {
    /// All event kind variants.
    ///
    /// Useful for iteration and validation.
    pub const ALL: [EventKind; 5] = [
        EventKind::Track,
        EventKind::Error,
        EventKind::WebVitals,
        EventKind::OutgoingLink,
        EventKind::Custom,
    ];

    /// Returns the store-key string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Error => "error",
            Self::WebVitals => "web_vitals",
            Self::OutgoingLink => "outgoing_link",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid event kind string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event kind '{input}': expected one of track, error, web_vitals, outgoing_link, custom")]
pub struct ParseEventKindError {
    /// The invalid input string.
    pub input: String,
}

impl FromStr for EventKind {
    type Err = ParseEventKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| ParseEventKindError {
                input: s.to_owned(),
            })
    }
}
