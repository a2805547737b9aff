//! Request DTOs for the shortlink API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use axum::http::HeaderValue;
use serde::Deserialize;

/// Request body for POST /api/shorten
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    /// URL to shorten
    pub url: String,
    /// Link lifetime in minutes; 0 keeps the link forever
    pub expiration_in_minutes: i64,
}

impl ShortenRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        // The URL is sent back verbatim as a Location header.
        if HeaderValue::from_str(&self.url).is_err() {
            return Some("url contains characters not allowed in a redirect".to_string());
        }
        if self.expiration_in_minutes < 0 {
            return Some("expiration_in_minutes must be at least 0".to_string());
        }
        None
    }
}

/// Query string for GET /api/info
#[derive(Debug, Clone, Deserialize)]
pub struct InfoQuery {
    pub shortlink: String,
}
