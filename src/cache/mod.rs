//! Cache Module
//!
//! In-process TTL cache that fronts expensive recipe queries, plus the key scheme
//! its callers use to address it.

mod clock;
mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;
