//! Stored Entry Module
//!
//! A single value held by the in-memory store, with its expiry deadline.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Stored Entry ==
/// Represents a single stored value with its deadline.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry that expires after `ttl`, or never if `ttl` is None.
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|ttl| {
            current_timestamp_ms().saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
        });

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against a fixed clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
