//! Key-Value Store Module
//!
//! Abstracts the store that holds the shortlink key spaces. Backends must
//! provide atomic increment, get, set-with-expiry and an atomic batch write.

mod entry;
mod memory;
mod redis_store;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

// == Store Error Enum ==
/// Errors raised by a key-value backend.
#[derive(Error, Debug)]
pub enum KvError {
    /// Transport or command failure reported by Redis
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// INCR on a key whose value is not an integer
    #[error("value at '{0}' is not an integer")]
    NotAnInteger(String),

    /// In-memory store reached its capacity
    #[error("store is full ({0} entries)")]
    Full(usize),

    /// TTL cannot be represented by the backend
    #[error("invalid ttl: {0:?}")]
    InvalidTtl(Duration),
}

/// Convenience Result type for store operations.
pub type KvResult<T> = std::result::Result<T, KvError>;

// == Store Trait ==
/// Operations the shortlink core needs from its backing store.
///
/// A `ttl` of `None` stores the key without expiration.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Atomically increments the integer at `key` and returns the new value.
    /// A missing key counts from zero.
    async fn incr(&self, key: &str) -> KvResult<i64>;

    /// Returns the value at `key`, or `None` if it does not exist.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Stores a single value.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> KvResult<()>;

    /// Stores every entry with the same TTL. Either all entries are written
    /// or none are.
    async fn set_all(&self, entries: &[(String, String)], ttl: Option<Duration>) -> KvResult<()>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> KvResult<()>;
}
