//! Link Store Module
//!
//! Allocation and lookup protocol over the key-value store: a global counter
//! for identifiers, a fingerprint cache for idempotent shortening, and the
//! link record and detail keyed by token. All three keys of a link share one
//! expiration.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, ShortlinkError};
use crate::kv::{KvError, KvStore};
use crate::shortlink::keys::{shortlink_detail_key, shortlink_url_key, url_hash_key, NEXT_URL_ID};
use crate::shortlink::{base62, fingerprint, CachedToken, LinkDetail};

// == Link Store ==
/// Shortlink core. Holds only a handle to the shared store; cheap to clone.
#[derive(Clone)]
pub struct LinkStore {
    kv: Arc<dyn KvStore>,
}

impl LinkStore {
    // == Constructor ==
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    // == Shorten ==
    /// Returns the token for `url`, allocating a new one unless a live token
    /// already exists for the same URL.
    ///
    /// A cache hit returns the existing token without extending its lifetime.
    /// Two concurrent first calls for the same URL may both allocate; each
    /// token is then a valid, independent link.
    ///
    /// `expiration_in_minutes` of 0 stores the link without expiration.
    pub async fn shorten(&self, url: &str, expiration_in_minutes: i64) -> Result<String> {
        let ttl = expiration_ttl(expiration_in_minutes)?;

        let hash_key = url_hash_key(&fingerprint(url));
        let cached = self
            .kv
            .get(&hash_key)
            .await
            .map_err(|e| ShortlinkError::store("get", &hash_key, e))?;

        match CachedToken::from_lookup(cached) {
            CachedToken::Live(token) => {
                debug!("Fingerprint cache hit for {}: {}", url, token);
                return Ok(token);
            }
            CachedToken::Expired => debug!("Fingerprint cache entry spent for {}", url),
            CachedToken::Absent => debug!("Fingerprint cache miss for {}", url),
        }

        let id = self.next_id().await?;
        let token = base62::encode(id);

        let detail_key = shortlink_detail_key(&token);
        let detail = serde_json::to_string(&LinkDetail::new(url, expiration_in_minutes)).map_err(
            |source| ShortlinkError::CorruptRecord {
                key: detail_key.clone(),
                source,
            },
        )?;

        let url_key = shortlink_url_key(&token);
        let batch = [
            (url_key.clone(), url.to_string()),
            (hash_key, token.clone()),
            (detail_key, detail),
        ];
        // The identifier stays consumed if this write fails.
        self.kv.set_all(&batch, ttl).await.map_err(|e| {
            warn!("Failed to store link {} (id {}): {}", token, id, e);
            ShortlinkError::store("set", url_key, e)
        })?;

        info!(
            "Created shortlink {} for {} (expires in {} min)",
            token, url, expiration_in_minutes
        );
        Ok(token)
    }

    // == Info ==
    /// Returns the stored detail of a link.
    pub async fn info(&self, token: &str) -> Result<LinkDetail> {
        let key = shortlink_detail_key(token);
        let raw = self.lookup(&key, token).await?;

        serde_json::from_str(&raw).map_err(|source| ShortlinkError::CorruptRecord { key, source })
    }

    // == Unshorten ==
    /// Returns the original URL of a link.
    pub async fn unshorten(&self, token: &str) -> Result<String> {
        let key = shortlink_url_key(token);
        self.lookup(&key, token).await
    }

    // == Ping ==
    /// Checks that the backing store is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.kv
            .ping()
            .await
            .map_err(|e| ShortlinkError::store("ping", "PING", e))
    }

    async fn next_id(&self) -> Result<u64> {
        let value = self
            .kv
            .incr(NEXT_URL_ID)
            .await
            .map_err(|e| ShortlinkError::store("incr", NEXT_URL_ID, e))?;

        u64::try_from(value).map_err(|_| {
            ShortlinkError::store(
                "incr",
                NEXT_URL_ID,
                KvError::NotAnInteger(NEXT_URL_ID.to_string()),
            )
        })
    }

    async fn lookup(&self, key: &str, token: &str) -> Result<String> {
        self.kv
            .get(key)
            .await
            .map_err(|e| ShortlinkError::store("get", key, e))?
            .ok_or_else(|| ShortlinkError::NotFound(token.to_string()))
    }
}

/// Converts an expiration in minutes to a store TTL. Zero means no expiry.
fn expiration_ttl(minutes: i64) -> Result<Option<Duration>> {
    if minutes < 0 {
        return Err(ShortlinkError::InvalidInput(format!(
            "expiration must not be negative, got {}",
            minutes
        )));
    }
    if minutes == 0 {
        return Ok(None);
    }

    (minutes as u64)
        .checked_mul(60_000)
        .map(|ms| Some(Duration::from_millis(ms)))
        .ok_or_else(|| {
            ShortlinkError::InvalidInput(format!("expiration of {} minutes is too large", minutes))
        })
}
