//! API Module
//!
//! HTTP handlers and routing for the shortlink service.
//!
//! # Endpoints
//! - `POST /api/shorten` - Create a shortlink
//! - `GET /api/info` - Fetch link detail
//! - `GET /:shortlink` - Redirect to the original URL
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
