//! Cache Statistics Module
//!
//! Counts how reads against the page cache resolve and how often it is wiped.

use serde::Serialize;

// == Cache Stats ==
/// Read and invalidation counters for a [`TtlCache`](super::TtlCache).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Reads that returned a fresh value
    pub hits: u64,
    /// Reads that returned nothing (never set or stale)
    pub misses: u64,
    /// Misses that found and removed a stale record
    pub expirations: u64,
    /// Number of full `clear` calls
    pub clears: u64,
    /// Records currently held, stale ones not yet discovered included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recording ==
    /// Counts a read that returned a fresh value.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a read that returned nothing.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts a stale record removed by a read. Also counts as a miss.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
        self.misses += 1;
    }

    /// Counts a full wipe of the cache.
    pub fn record_clear(&mut self) {
        self.clears += 1;
    }

    // == Entry Count ==
    /// Sets the number of records currently held.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
