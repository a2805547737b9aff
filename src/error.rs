//! Error types for the shortlink service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::kv::KvError;

// == Shortlink Error Enum ==
/// Unified error type for the shortlink service.
#[derive(Error, Debug)]
pub enum ShortlinkError {
    /// Malformed URL or expiration
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Token contains characters outside the base62 alphabet
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// No link is stored under the token
    #[error("Unknown short URL: {0}")]
    NotFound(String),

    /// The key-value store failed; never retried locally
    #[error("Store unavailable during {op} on '{key}': {source}")]
    StoreUnavailable {
        op: &'static str,
        key: String,
        #[source]
        source: KvError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// A stored value could not be decoded
    #[error("Corrupt record at '{key}': {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ShortlinkError {
    /// Wraps a store failure with the operation and key it happened on.
    pub fn store(op: &'static str, key: impl Into<String>, source: KvError) -> Self {
        Self::StoreUnavailable {
            op,
            key: key.into(),
            source,
        }
    }

    /// HTTP-equivalent status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidToken(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) | Self::CorruptRecord { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ShortlinkError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("HTTP {} - {}", status.as_u16(), self);
        } else {
            warn!("HTTP {} - {}", status.as_u16(), self);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the shortlink service.
pub type Result<T> = std::result::Result<T, ShortlinkError>;
