//! Cache Store Module
//!
//! Thread-safe wrapper that lazily builds an [`Lru`] engine and serializes
//! every access to it behind a single lock.

use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, Lru, OnEvicted, Value};
use crate::config::Config;

// == Cache ==
/// Byte-budgeted LRU cache safe to share between threads.
///
/// The engine is allocated on the first [`add`](Cache::add). Until then every
/// lookup is a miss. All methods take `&self`; share the cache as
/// `Arc<Cache<V>>` rather than copying it, so there is exactly one lock.
///
/// An eviction callback runs while the lock is held. It must not call back
/// into the same cache, which would deadlock.
pub struct Cache<V> {
    inner: Mutex<Inner<V>>,
    /// Byte budget handed to the engine on construction, 0 = unbounded
    max_bytes: usize,
}

struct Inner<V> {
    lru: Option<Lru<V>>,
    /// Held until the engine is built, then moved into it
    on_evicted: Option<OnEvicted<V>>,
    stats: CacheStats,
}

impl<V: Value> Inner<V> {
    fn engine(&mut self, max_bytes: usize) -> &mut Lru<V> {
        let on_evicted = &mut self.on_evicted;
        self.lru.get_or_insert_with(|| {
            debug!("Initializing LRU engine with max_bytes={}", max_bytes);
            Lru::new(max_bytes, on_evicted.take())
        })
    }
}

impl<V: Value> Cache<V> {
    // == Constructors ==
    /// Creates a cache with the given byte budget and no eviction callback.
    pub fn new(max_bytes: usize) -> Self {
        Self::build(max_bytes, None)
    }

    /// Creates a cache whose engine notifies `on_evicted` for every eviction.
    pub fn with_on_evicted(max_bytes: usize, on_evicted: OnEvicted<V>) -> Self {
        Self::build(max_bytes, Some(on_evicted))
    }

    /// Creates a cache sized from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_bytes)
    }

    fn build(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                lru: None,
                on_evicted,
                stats: CacheStats::new(),
            }),
            max_bytes,
        }
    }

    // == Add ==
    /// Stores a value, building the engine first if this is the first write.
    pub fn add(&self, key: impl Into<String>, value: V) {
        let mut inner = self.inner.lock();
        inner.engine(self.max_bytes).add(key, value);
    }

    // == Accessors ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, Lru::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, Lru::used_bytes)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Whether the engine has been allocated yet.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().lru.is_some()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.max_bytes = self.max_bytes;
        if let Some(lru) = inner.lru.as_ref() {
            stats.evictions = lru.evictions();
            stats.total_entries = lru.len();
            stats.used_bytes = lru.used_bytes();
        }
        stats
    }
}

impl<V: Value + Clone> Cache<V> {
    // == Get ==
    /// Retrieves a copy of the value for `key`, marking it most recently used.
    ///
    /// Returns `None` if the key is absent or nothing has been added yet.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock();
        let inner = &mut *inner;

        let value = inner.lru.as_mut().and_then(|lru| lru.get(key).cloned());
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        value
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
