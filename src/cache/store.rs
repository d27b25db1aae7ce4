//! Cache Store Module
//!
//! Unsynchronized key/value map with TTL-aware lookups and purging. Callers
//! pass the current instant explicitly; locking lives in [`crate::cache::Cache`].

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::CacheEntry;

// == Cache Store ==
/// Key to entry mapping. At most one entry per key, last write wins.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Set ==
    /// Stores a value that never expires, replacing any prior entry.
    pub fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, CacheEntry::permanent(value));
    }

    // == Set With TTL ==
    /// Stores a value that expires `ttl` after `now`, replacing any prior entry.
    pub fn set_with_ttl(&mut self, key: String, value: String, ttl: Duration, now: Instant) {
        self.entries
            .insert(key, CacheEntry::with_ttl(value, ttl, now));
    }

    // == Get ==
    /// Returns the entry for `key` if it exists and is still valid at `now`.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str, now: Instant) -> Option<&CacheEntry> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
    }

    // == Purge Expired ==
    /// Removes every entry expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an entry is physically stored under `key`, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
