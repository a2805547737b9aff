//! Memory Store Module
//!
//! In-process key-value backend with TTL expiration. Expired entries are
//! dropped lazily on read and in bulk by the cleanup task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::current_timestamp_ms;
use super::{KvError, KvResult, KvStore, StoredEntry};

// == Memory Store ==
/// Shared in-memory store. Cloning yields another handle to the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
    /// Maximum number of live entries allowed
    max_entries: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            max_entries,
        }
    }

    // == Delete ==
    /// Removes a key. Returns true if it existed.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries)
    }

    // == Length ==
    /// Returns the number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Makes room for `incoming` new keys, purging expired entries if needed.
    fn reserve(&self, entries: &mut HashMap<String, StoredEntry>, incoming: usize) -> KvResult<()> {
        if entries.len() + incoming <= self.max_entries {
            return Ok(());
        }
        purge_expired(entries);
        if entries.len() + incoming > self.max_entries {
            return Err(KvError::Full(self.max_entries));
        }
        Ok(())
    }
}

fn purge_expired(entries: &mut HashMap<String, StoredEntry>) -> usize {
    let now = current_timestamp_ms();
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired_at(now));
    before - entries.len()
}

/// Returns the live entry at `key`, dropping it first if it has expired.
fn live_entry<'a>(
    entries: &'a mut HashMap<String, StoredEntry>,
    key: &str,
) -> Option<&'a mut StoredEntry> {
    if entries.get(key).is_some_and(StoredEntry::is_expired) {
        entries.remove(key);
        return None;
    }
    entries.get_mut(key)
}

/// Counts keys in `keys` that are not currently live.
fn new_keys<'a>(
    entries: &mut HashMap<String, StoredEntry>,
    keys: impl Iterator<Item = &'a String>,
) -> usize {
    keys.filter(|key| live_entry(entries, key).is_none()).count()
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn incr(&self, key: &str) -> KvResult<i64> {
        let mut entries = self.entries.write().await;

        if let Some(entry) = live_entry(&mut entries, key) {
            let next = entry
                .value
                .parse::<i64>()
                .ok()
                .and_then(|current| current.checked_add(1))
                .ok_or_else(|| KvError::NotAnInteger(key.to_string()))?;
            // INCR keeps the existing expiry.
            entry.value = next.to_string();
            return Ok(next);
        }

        self.reserve(&mut entries, 1)?;
        entries.insert(key.to_string(), StoredEntry::new("1".to_string(), None));
        Ok(1)
    }

    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it under the write lock. The key may have been
        // rewritten in between, so look again.
        let mut entries = self.entries.write().await;
        Ok(live_entry(&mut entries, key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> KvResult<()> {
        let mut entries = self.entries.write().await;

        if live_entry(&mut entries, key).is_none() {
            self.reserve(&mut entries, 1)?;
        }
        entries.insert(key.to_string(), StoredEntry::new(value.to_string(), ttl));
        Ok(())
    }

    async fn set_all(&self, batch: &[(String, String)], ttl: Option<Duration>) -> KvResult<()> {
        let mut entries = self.entries.write().await;

        let incoming = new_keys(&mut entries, batch.iter().map(|(key, _)| key));
        self.reserve(&mut entries, incoming)?;

        // Shared deadline so every key in the batch expires at the same instant.
        let template = StoredEntry::new(String::new(), ttl);
        for (key, value) in batch {
            let mut entry = template.clone();
            entry.value = value.clone();
            entries.insert(key.clone(), entry);
        }
        Ok(())
    }

    async fn ping(&self) -> KvResult<()> {
        Ok(())
    }
}
