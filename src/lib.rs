//! Mini Shortlink - A small URL shortening service
//!
//! Maps URLs to short base62 tokens backed by Redis or an in-memory store,
//! with idempotent shortening and per-link expiration.

pub mod api;
pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod shortlink;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::ShortlinkError;
pub use shortlink::{LinkDetail, LinkStore};
pub use tasks::spawn_cleanup_task;
