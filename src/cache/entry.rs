//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Expiry ==
/// When an entry stops being visible to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry lives until it is replaced.
    Never,
    /// The entry is valid up to and including this instant.
    At(Instant),
}

// == Cache Entry ==
/// Represents a single cache entry with value and expiry.
///
/// Entries are never mutated after construction; a new set on the same key
/// replaces the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration policy
    pub expiry: Expiry,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry that never expires.
    pub fn permanent(value: String) -> Self {
        Self {
            value,
            expiry: Expiry::Never,
        }
    }

    /// Creates an entry that expires `ttl` after `now`.
    ///
    /// A zero TTL produces an entry that is already expired at `now`.
    pub fn with_ttl(value: String, ttl: Duration, now: Instant) -> Self {
        let deadline = if ttl.is_zero() {
            now.checked_sub(Duration::from_nanos(1)).unwrap_or(now)
        } else {
            now.checked_add(ttl).unwrap_or_else(|| far_future(now))
        };

        Self {
            value,
            expiry: Expiry::At(deadline),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired relative to `now`.
    ///
    /// The deadline itself is still valid: an entry is expired only once
    /// `now` is strictly past it.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expiry {
            Expiry::At(deadline) => deadline < now,
            Expiry::Never => false,
        }
    }
}

/// Deadline used when `now + ttl` overflows the clock.
fn far_future(now: Instant) -> Instant {
    // ~30 years, well inside every platform's Instant range
    now + Duration::from_secs(86_400 * 365 * 30)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_permanent() {
        let entry = CacheEntry::permanent("test_value".to_string());

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.expiry, Expiry::Never);
        assert!(!entry.is_expired_at(Instant::now()));
    }

    #[test]
    fn test_entry_with_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::with_ttl("test_value".to_string(), Duration::from_secs(60), now);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.expiry, Expiry::At(now + Duration::from_secs(60)));
        assert!(!entry.is_expired_at(now));
    }

    #[test]
    fn test_entry_expiration() {
        let now = Instant::now();
        let entry = CacheEntry::with_ttl("v".to_string(), Duration::from_millis(10), now);

        assert!(!entry.is_expired_at(now + Duration::from_millis(5)));
        assert!(entry.is_expired_at(now + Duration::from_millis(11)));
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let now = Instant::now();
        let ttl = Duration::from_millis(10);
        let entry = CacheEntry::with_ttl("v".to_string(), ttl, now);

        // Exactly at the deadline the entry is still valid
        assert!(!entry.is_expired_at(now + ttl));
        assert!(entry.is_expired_at(now + ttl + Duration::from_nanos(1)));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let now = Instant::now();
        let entry = CacheEntry::with_ttl("v".to_string(), Duration::ZERO, now);

        assert!(entry.is_expired_at(now));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let now = Instant::now();
        let entry = CacheEntry::with_ttl("v".to_string(), Duration::MAX, now);

        assert!(!entry.is_expired_at(now));
        assert!(matches!(entry.expiry, Expiry::At(_)));
    }

    #[test]
    fn test_permanent_never_expires() {
        let now = Instant::now();
        let entry = CacheEntry::permanent("v".to_string());

        assert!(!entry.is_expired_at(now + Duration::from_secs(86_400 * 365)));
    }
}
