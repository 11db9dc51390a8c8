//! Byte LRU - An in-process, byte-budgeted LRU cache
//!
//! Bounds the total size of cached keys and values, evicting the least
//! recently used entries once the configured byte ceiling is exceeded.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Cache, CacheStats, Lru, OnEvicted, Value};
pub use config::Config;
pub use error::{CacheError, Result};
