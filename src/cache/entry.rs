//! Cache Entry Module
//!
//! A cached value together with the moment it was written and the moment it goes stale.

// == Milliseconds Per Minute ==
const MS_PER_MINUTE: u64 = 60 * 1000;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Value and expiry live in one record so they are always written and removed together.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Write timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Absolute expiry timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry written at `now_ms` that stays fresh for `ttl_minutes`.
    pub fn new(value: V, now_ms: u64, ttl_minutes: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_minutes.saturating_mul(MS_PER_MINUTE)),
        }
    }

    // == Is Fresh ==
    /// An entry is fresh while its expiry lies strictly in the future.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        self.expires_at > now_ms
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expiry_is_now_plus_ttl() {
        let entry = CacheEntry::new("v", 10_000, 5);

        assert_eq!(entry.created_at, 10_000);
        assert_eq!(entry.expires_at, 10_000 + 5 * 60_000);
    }

    #[test]
    fn test_entry_fresh_until_boundary() {
        let entry = CacheEntry::new("v", 0, 1);

        assert!(entry.is_fresh(59_999));
        // expires_at > now is required, so the exact boundary is stale
        assert!(!entry.is_fresh(60_000));
        assert!(!entry.is_fresh(60_001));
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let entry = CacheEntry::new("v", 5_000, 0);
        assert!(!entry.is_fresh(5_000));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("v", 0, 2);

        assert_eq!(entry.ttl_remaining_ms(30_000), 90_000);
        assert_eq!(entry.ttl_remaining_ms(500_000), 0);
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let entry = CacheEntry::new("v", 1, u64::MAX);
        assert_eq!(entry.expires_at, u64::MAX);
    }
}
