//! Shared Cache Handle
//!
//! Thread-safe cache engine. One reader/writer lock guards the whole map:
//! mutations take it exclusively, reads share it.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::cache::CacheStore;

// == Cache ==
/// Cloneable handle to one cache instance.
///
/// Clones share the same underlying map. Independent instances can coexist
/// since there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    store: Arc<RwLock<CacheStore>>,
}

impl Cache {
    // == Constructor ==
    /// Creates a new, empty cache ready for concurrent use.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
        }
    }

    // == Set ==
    /// Inserts or replaces `key` with a value that never expires.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.store.write().set(key, value);
    }

    // == Set With TTL ==
    /// Inserts or replaces `key` with a value that expires after `ttl`.
    ///
    /// A zero TTL stores an entry that is already expired: it is never
    /// returned by [`Cache::get`] and goes away on the next sweep.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        let (key, value) = (key.into(), value.into());
        let mut store = self.store.write();
        store.set_with_ttl(key, value, ttl, Instant::now());
    }

    // == Get ==
    /// Returns the value for `key` if present and not expired.
    ///
    /// Takes the shared lock only, so concurrent gets never block each other.
    pub fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read();
        store
            .get(key, Instant::now())
            .map(|entry| entry.value.clone())
    }

    // == Sweep ==
    /// Runs one sweep pass, removing every entry expired at the start of the pass.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let mut store = self.store.write();
        // One snapshot of "now" for the whole pass
        let now = Instant::now();
        store.purge_expired(now)
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Returns true if `key` is physically stored, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.store.read().contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Expiry;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_cache_get_unset_key() {
        let cache = Cache::new();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_cache_set_and_get() {
        let cache = Cache::new();

        cache.set("a", "1");

        assert_eq!(cache.get("a"), Some("1".to_string()));
    }

    #[test]
    fn test_cache_empty_value_distinct_from_missing() {
        let cache = Cache::new();

        cache.set("empty", "");

        assert_eq!(cache.get("empty"), Some(String::new()));
        assert_eq!(cache.get("other"), None);
    }

    #[test]
    fn test_cache_overwrite() {
        let cache = Cache::new();

        cache.set("c", "x");
        cache.set("c", "y");

        assert_eq!(cache.get("c"), Some("y".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_zero_ttl_invisible() {
        let cache = Cache::new();

        cache.set_with_ttl("k", "v", Duration::ZERO);

        assert_eq!(cache.get("k"), None);
        assert!(cache.contains_key("k"));
        assert_eq!(cache.sweep(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_ttl_expires_without_sweep() {
        let cache = Cache::new();

        cache.set_with_ttl("b", "2", Duration::from_millis(10));
        assert_eq!(cache.get("b"), Some("2".to_string()));

        thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get("b"), None);
        // Still physically present until swept
        assert!(cache.contains_key("b"));
    }

    #[test]
    fn test_cache_sweep_three_entries() {
        let cache = Cache::new();

        cache.set("forever", "1");
        cache.set_with_ttl("expired", "2", Duration::from_millis(5));
        cache.set_with_ttl("fresh", "3", Duration::from_secs(3600));

        thread::sleep(Duration::from_millis(15));
        let removed = cache.sweep();

        assert_eq!(removed, 1);
        assert!(cache.contains_key("forever"));
        assert!(cache.contains_key("fresh"));
        assert!(!cache.contains_key("expired"));
    }

    #[test]
    fn test_cache_clones_share_state() {
        let cache = Cache::new();
        let other = cache.clone();

        other.set("shared", "yes");

        assert_eq!(cache.get("shared"), Some("yes".to_string()));
    }

    #[test]
    fn test_cache_instances_are_independent() {
        let first = Cache::new();
        let second = Cache::new();

        first.set("k", "v");

        assert_eq!(second.get("k"), None);
    }

    #[test]
    fn test_concurrent_readers_hold_lock_together() {
        let cache = Cache::new();
        cache.set("k", "v");

        // Both threads hold a read guard at the same time; with an exclusive
        // lock the second would never reach the barrier.
        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let store = cache.store.read();
                    barrier.wait();
                    store.get("k", Instant::now()).map(|e| e.value.clone())
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some("v".to_string()));
        }
    }

    #[test]
    fn test_concurrent_writers_and_readers_never_tear() {
        let cache = Cache::new();
        cache.set("k", "w0-0");

        let writers: Vec<_> = (0..4)
            .map(|w| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500 {
                        let value = format!("w{}-{}", w, i);
                        if i % 2 == 0 {
                            cache.set("k", value);
                        } else {
                            cache.set_with_ttl("k", value, Duration::from_secs(60));
                        }
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let store = cache.store.read();
                        let entry = store
                            .get("k", Instant::now())
                            .expect("key is always live");
                        let (writer, index) = entry.value[1..].split_once('-').unwrap();
                        let index = index.parse::<u32>().unwrap();
                        assert!(writer.parse::<u32>().unwrap() < 4);
                        assert!(index < 500);
                        // Even writes are permanent, odd writes carry a TTL
                        if index % 2 == 0 {
                            assert_eq!(entry.expiry, Expiry::Never, "torn entry {:?}", entry);
                        } else {
                            assert!(
                                matches!(entry.expiry, Expiry::At(_)),
                                "torn entry {:?}",
                                entry
                            );
                        }
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
