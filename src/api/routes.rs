//! API Routes
//!
//! Configures the Axum router with all shortlink endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, info_handler, redirect_handler, shorten_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/shorten` - Create a shortlink
/// - `GET /api/info?shortlink=<token>` - Link detail
/// - `GET /health` - Health check endpoint
/// - `GET /:shortlink` - Redirect to the original URL
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/shorten", post(shorten_handler))
        .route("/api/info", get(info_handler))
        .route("/health", get(health_handler))
        .route("/:shortlink", get(redirect_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
