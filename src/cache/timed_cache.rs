//! Time-based cache with TTL (Time To Live) support.
//!
//! Backs the session store: each entry lives for a fixed duration after its
//! last write and is then treated as absent.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    touched_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.touched_at) < ttl
    }
}

/// A thread-safe cache with time-based expiration.
///
/// An entry expires `ttl` after it was last written through [`upsert_with`].
/// [`modify`] does not extend its life. Expired entries are invisible but
/// stay allocated until [`purge_expired`] runs. Clones share the same storage.
///
/// A poisoned lock is treated as an empty cache.
///
/// [`upsert_with`]: TimedCache::upsert_with
/// [`modify`]: TimedCache::modify
/// [`purge_expired`]: TimedCache::purge_expired
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new TimedCache whose entries live `ttl` past their last write.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Mutate the value for `key` in place, starting from `V::default()` when
    /// the key is absent or expired. Restarts the entry's TTL.
    ///
    /// Returns `None` only if the lock is poisoned.
    pub fn upsert_with<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> Option<R>
    where
        V: Default,
    {
        let now = Instant::now();
        let mut entries = self.entries.write().ok()?;

        let entry = entries.entry(key).or_insert_with(|| CacheEntry {
            value: V::default(),
            touched_at: now,
        });
        if !entry.is_live(now, self.ttl) {
            entry.value = V::default();
        }
        entry.touched_at = now;

        Some(f(&mut entry.value))
    }

    /// Mutate a live value in place without extending its TTL.
    ///
    /// Returns `None` if the key is absent or expired.
    pub fn modify<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let now = Instant::now();
        let mut entries = self.entries.write().ok()?;

        entries
            .get_mut(key)
            .filter(|entry| entry.is_live(now, self.ttl))
            .map(|entry| f(&mut entry.value))
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();

        match self.entries.write() {
            Ok(mut entries) => {
                let before = entries.len();
                entries.retain(|_, entry| entry.is_live(now, self.ttl));
                before - entries.len()
            }
            Err(_) => 0,
        }
    }

    /// Get the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
