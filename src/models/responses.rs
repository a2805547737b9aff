//! Response DTOs for the shortlink API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for POST /api/shorten
#[derive(Debug, Clone, Serialize)]
pub struct ShortlinkResponse {
    /// The issued token
    pub shortlink: String,
}

impl ShortlinkResponse {
    pub fn new(shortlink: impl Into<String>) -> Self {
        Self {
            shortlink: shortlink.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a HealthResponse for a reachable store
    pub fn healthy() -> Self {
        Self::with_status("healthy")
    }

    /// Creates a HealthResponse for an unreachable store
    pub fn unhealthy() -> Self {
        Self::with_status("unhealthy")
    }

    fn with_status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
