//! Cache Store Module
//!
//! Process-wide TTL cache: a HashMap of entry records with lazy expiry.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == TTL Cache ==
/// Key-value store where every entry carries an absolute expiry.
///
/// Stale entries are not swept in the background. A `get` that finds one removes it
/// and reports a miss, so never-set and expired keys look the same to callers.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key to entry record
    entries: HashMap<String, CacheEntry<V>>,
    /// Read counters
    stats: CacheStats,
    /// TTL in minutes applied when `set` is called without one
    default_ttl_minutes: u64,
    /// Time source for stamping and checking expiry
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache reading the system wall clock.
    pub fn new(default_ttl_minutes: u64) -> Self {
        Self::with_clock(default_ttl_minutes, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading `clock`.
    pub fn with_clock(default_ttl_minutes: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl_minutes,
            clock,
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry outright.
    ///
    /// Expiry is measured from this call, not from the original write.
    /// `ttl_minutes` of `None` falls back to the configured default.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl_minutes: Option<u64>) {
        let key = key.into();
        let ttl = ttl_minutes.unwrap_or(self.default_ttl_minutes);
        let entry = CacheEntry::new(value, self.clock.now_ms(), ttl);

        debug!(key = %key, ttl_minutes = ttl, "cache set");
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns a clone of the value if its entry is still fresh.
    ///
    /// A stale entry is removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_with(key, Some)
    }

    /// Like [`TtlCache::get`], but only counts a hit if `accept` takes the value.
    ///
    /// A fresh entry that `accept` rejects is removed and counted as a miss, so the
    /// caller recomputes it and the counters match what the caller saw.
    pub fn get_with<T>(&mut self, key: &str, accept: impl FnOnce(V) -> Option<T>) -> Option<T> {
        let now = self.clock.now_ms();

        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if !entry.is_fresh(now) {
            self.entries.remove(key);
            self.stats.record_expiration();
            debug!(key = %key, "cache entry expired");
            return None;
        }

        let remaining_ms = entry.ttl_remaining_ms(now);
        match accept(entry.value.clone()) {
            Some(value) => {
                self.stats.record_hit();
                debug!(key = %key, remaining_ms, "cache entry fresh");
                Some(value)
            }
            None => {
                self.entries.remove(key);
                self.stats.record_miss();
                warn!(key = %key, "cached value has unexpected shape, dropping entry");
                None
            }
        }
    }

    // == Clear ==
    /// Drops every entry regardless of remaining TTL.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.record_clear();
    }

    // == Stats ==
    /// Returns current counters with an up to date entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Raw Inspection ==
    /// True if a record for `key` is held, fresh or not. Does not expire anything.
    pub fn contains_entry(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of records held, including stale ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no records are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Configuration ==
    /// TTL in minutes used by `set` calls that do not name one.
    pub fn default_ttl_minutes(&self) -> u64 {
        self.default_ttl_minutes
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::{json, Value};

    fn cache_with_clock() -> (TtlCache<Value>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = TtlCache::with_clock(30, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_cache_new() {
        let cache: TtlCache<String> = TtlCache::new(30);
        assert!(cache.is_empty());
        assert_eq!(cache.default_ttl_minutes(), 30);
    }

    #[test]
    fn test_set_then_get() {
        let (mut cache, _clock) = cache_with_clock();

        cache.set("site_stats", json!({"totalRecipes": 100}), Some(5));

        assert_eq!(cache.get("site_stats"), Some(json!({"totalRecipes": 100})));
    }

    #[test]
    fn test_get_never_set() {
        let (mut cache, _clock) = cache_with_clock();
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("site_stats", json!({"totalRecipes": 100}), Some(5));
        assert!(cache.get("site_stats").is_some());

        clock.advance_minutes(6);

        // The record lingers until a read discovers it
        assert!(cache.contains_entry("site_stats"));
        assert_eq!(cache.get("site_stats"), None);
        assert!(!cache.contains_entry("site_stats"));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_default_ttl_applies() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", json!(1), None);

        clock.advance_minutes(29);
        assert!(cache.get("k").is_some());

        clock.advance_minutes(1);
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let (mut cache, clock) = cache_with_clock();

        cache.set("k", json!("old"), Some(10));
        clock.advance_minutes(8);
        cache.set("k", json!("new"), Some(10));
        clock.advance_minutes(8);

        // 16 minutes after the first write, 8 after the second
        assert_eq!(cache.get("k"), Some(json!("new")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (mut cache, _clock) = cache_with_clock();

        cache.set("a", json!(1), Some(1440));
        cache.set("b", json!(2), Some(1));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.stats().clears, 1);
    }

    #[test]
    fn test_get_with_rejected_value_counts_miss() {
        let (mut cache, _clock) = cache_with_clock();

        cache.set("k", json!("text"), None);
        let as_number = cache.get_with("k", |v| v.as_u64());

        assert_eq!(as_number, None);
        assert!(!cache.contains_entry("k"));
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_stats_track_reads() {
        let (mut cache, _clock) = cache_with_clock();

        cache.set("k", json!(1), None);
        cache.get("k");
        cache.get("k");
        cache.get("other");

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
