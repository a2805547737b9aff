//! Link Detail and Fingerprint Cache Types

use serde::{Deserialize, Serialize};

// == Link Detail ==
/// Metadata stored next to every link, under `shortlink:<token>:detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDetail {
    /// Original URL
    pub url: String,
    /// Creation time. RFC 3339 for new links; older records may use other
    /// formats, so it is kept as written.
    pub created_at: String,
    /// Expiration the link was created with, in minutes (0 = never)
    pub expiration_in_minutes: i64,
}

impl LinkDetail {
    /// Creates a detail stamped with the current time.
    pub fn new(url: impl Into<String>, expiration_in_minutes: i64) -> Self {
        Self {
            url: url.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            expiration_in_minutes,
        }
    }
}

// == Cached Token ==
/// State of a fingerprint cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedToken {
    /// No entry for the fingerprint
    Absent,
    /// Entry present but holding the empty sentinel; treated as a miss
    Expired,
    /// Entry pointing at a live token
    Live(String),
}

impl CachedToken {
    /// Sentinel value marking a cache entry as spent.
    pub const SENTINEL: &'static str = "{}";

    /// Interprets a raw lookup result.
    pub fn from_lookup(value: Option<String>) -> Self {
        match value {
            None => Self::Absent,
            Some(v) if v.is_empty() || v == Self::SENTINEL => Self::Expired,
            Some(token) => Self::Live(token),
        }
    }
}
