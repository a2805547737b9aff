//! API Handlers
//!
//! HTTP request handlers for each shortlink endpoint.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Result, ShortlinkError};
use crate::kv::{KvStore, MemoryStore};
use crate::models::{HealthResponse, InfoQuery, ShortenRequest, ShortlinkResponse};
use crate::shortlink::{base62, LinkDetail, LinkStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shortlink core over the configured store
    pub links: LinkStore,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            links: LinkStore::new(kv),
        }
    }

    /// Creates an AppState backed by an in-memory store.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(Arc::new(store))
    }
}

/// Handler for POST /api/shorten
///
/// Returns 201 with the token for the URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortlinkResponse>)> {
    let Json(req) = payload
        .map_err(|e| ShortlinkError::InvalidInput(format!("parse parameters failed: {}", e)))?;

    if let Some(error_msg) = req.validate() {
        return Err(ShortlinkError::InvalidInput(error_msg));
    }

    let token = state
        .links
        .shorten(&req.url, req.expiration_in_minutes)
        .await?;

    Ok((StatusCode::CREATED, Json(ShortlinkResponse::new(token))))
}

/// Handler for GET /api/info?shortlink=<token>
pub async fn info_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<InfoQuery>, QueryRejection>,
) -> Result<Json<LinkDetail>> {
    let Query(query) = query
        .map_err(|e| ShortlinkError::InvalidInput(format!("parse parameters failed: {}", e)))?;

    if !base62::is_valid_token(&query.shortlink) {
        return Err(ShortlinkError::InvalidToken(query.shortlink));
    }

    let detail = state.links.info(&query.shortlink).await?;
    Ok(Json(detail))
}

/// Handler for GET /:shortlink
///
/// Redirects with 307 to the original URL. Tokens that could never have been
/// issued are reported as unknown. A stored URL that cannot be sent as a
/// Location header yields 500.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(shortlink): Path<String>,
) -> Result<Response> {
    debug!("Redirect requested for {}", shortlink);

    if !base62::is_valid_token(&shortlink) {
        return Err(ShortlinkError::NotFound(shortlink));
    }

    let url = state.links.unshorten(&shortlink).await?;
    let location = HeaderValue::try_from(url.as_str()).map_err(|_| {
        ShortlinkError::Internal(format!(
            "stored URL for {} is not a valid Location header",
            shortlink
        ))
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Handler for GET /health
///
/// Reports 503 when the store does not answer.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.links.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy())),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::unhealthy()),
            )
        }
    }
}
