//! Redis Store Module
//!
//! Redis backend using a `ConnectionManager`, which multiplexes one
//! connection across callers and reconnects on failure.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, error};

use super::{KvError, KvResult, KvStore};

// == Redis Store ==
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to `url` (e.g. `redis://127.0.0.1:6379/0`) and verifies the
    /// server answers PING.
    pub async fn connect(url: &str) -> KvResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await.map_err(|e| {
            error!("Failed to connect to Redis at {}: {}", url, e);
            e
        })?;

        let store = Self { conn };
        store.ping().await?;
        debug!("Redis connection established");

        Ok(store)
    }
}

/// Converts a TTL to the millisecond argument of PSETEX.
fn ttl_millis(ttl: Duration) -> KvResult<u64> {
    match u64::try_from(ttl.as_millis()) {
        Ok(0) | Err(_) => Err(KvError::InvalidTtl(ttl)),
        Ok(ms) => Ok(ms),
    }
}

/// Matches the server reply to INCR on a value that is not an integer, or
/// whose increment would overflow.
fn is_not_integer_reply(message: &str) -> bool {
    message.contains("not an integer") || message.contains("would overflow")
}

#[async_trait]
impl KvStore for RedisStore {
    async fn incr(&self, key: &str) -> KvResult<i64> {
        let mut conn = self.conn.clone();
        conn.incr::<_, _, i64>(key, 1i64).await.map_err(|e| {
            if is_not_integer_reply(&e.to_string()) {
                KvError::NotAnInteger(key.to_string())
            } else {
                KvError::from(e)
            }
        })
    }

    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.get::<_, Option<String>>(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> KvResult<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => conn.pset_ex::<_, _, ()>(key, value, ttl_millis(ttl)?).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    async fn set_all(&self, entries: &[(String, String)], ttl: Option<Duration>) -> KvResult<()> {
        let ttl_ms = ttl.map(ttl_millis).transpose()?;

        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            match ttl_ms {
                Some(ms) => pipe.pset_ex(key, value, ms).ignore(),
                None => pipe.set(key, value).ignore(),
            };
        }

        let mut conn = self.conn.clone();
        pipe.query_async::<()>(&mut conn).await?;
        Ok(())
    }

    async fn ping(&self) -> KvResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
