//! Store configuration.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to overlay entries when a collection replacement leaves
/// them pointing at identities that no longer exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPolicy {
    /// Keep every entry. Patches for vanished identities park in the
    /// overlay and re-apply if a matching record is ever loaded again.
    /// The default.
    #[default]
    Retain,
    /// Evict entries whose identity is absent from the new collection,
    /// directly after each replacement.
    EvictStale,
}

impl OverlayPolicy {
    /// Canonical string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayPolicy::Retain => "retain",
            OverlayPolicy::EvictStale => "evict_stale",
        }
    }
}

impl fmt::Display for OverlayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "retain" => Ok(OverlayPolicy::Retain),
            "evict_stale" => Ok(OverlayPolicy::EvictStale),
            other => Err(ParseError::OverlayPolicy(other.to_string())),
        }
    }
}

/// Tunables for a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Overlay treatment on collection replacement.
    pub overlay_policy: OverlayPolicy,
}

impl StoreOptions {
    /// Options with the stale-evicting overlay policy.
    pub fn evicting() -> Self {
        Self {
            overlay_policy: OverlayPolicy::EvictStale,
        }
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            overlay_policy: OverlayPolicy::Retain,
        }
    }
}
