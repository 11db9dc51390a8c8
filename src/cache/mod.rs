//! Cache Module
//!
//! Provides a byte-budgeted LRU eviction engine and a thread-safe wrapper
//! around it.

mod lru;
mod stats;
mod store;
mod value;


// Re-export public types
pub use lru::{Iter, Lru, OnEvicted};
pub use stats::CacheStats;
pub use store::Cache;
pub use value::Value;
