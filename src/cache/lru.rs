//! LRU Engine Module
//!
//! Byte-budgeted Least Recently Used eviction engine. Not synchronized; see
//! [`Cache`](crate::cache::Cache) for the thread-safe wrapper.

use std::collections::HashMap;
use std::fmt;
use std::mem;

use tracing::{debug, warn};

use crate::cache::Value;

/// Null link in the arena-backed recency list.
const SENTINEL: usize = usize::MAX;

/// Hook invoked once per evicted entry with the evicted key and value.
///
/// Runs synchronously inside whatever critical section drives the engine.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

// == Node ==
/// Arena slot. Free slots have `value == None` and are chained via `next`.
#[derive(Debug)]
struct Node<V> {
    key: String,
    value: Option<V>,
    prev: usize,
    next: usize,
}

// == LRU Engine ==
/// Key-value store bounded by the combined byte length of keys and values.
///
/// Entries are kept in a doubly-linked recency list stored in a `Vec` arena:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// A `max_bytes` of 0 disables eviction entirely.
pub struct Lru<V> {
    /// Byte budget, 0 = unbounded
    max_bytes: usize,
    /// Sum of key and value lengths over live entries
    used_bytes: usize,
    /// Key to arena index
    map: HashMap<String, usize>,
    arena: Vec<Node<V>>,
    head: usize,
    tail: usize,
    free_head: usize,
    /// Entries evicted over the engine's lifetime
    evictions: u64,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: Value> Lru<V> {
    // == Constructor ==
    /// Creates an empty engine with a fixed byte budget and optional
    /// eviction callback.
    pub fn new(max_bytes: usize, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            map: HashMap::new(),
            arena: Vec::new(),
            head: SENTINEL,
            tail: SENTINEL,
            free_head: SENTINEL,
            evictions: 0,
            on_evicted,
        }
    }

    // == Get ==
    /// Looks up a key, marking it as most recently used on a hit.
    ///
    /// A miss has no side effects.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.arena[idx].value.as_ref()
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts from the tail until the
    /// budget is met.
    ///
    /// Replacing an existing key only charges the difference between the new
    /// and old value lengths. An entry that alone exceeds the budget is
    /// evicted by the same loop before `add` returns.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let value_len = value.byte_len();

        if self.max_bytes != 0 && key.len() + value_len > self.max_bytes {
            warn!(
                "Entry {} ({} bytes) exceeds the cache budget of {} bytes and will not be retained",
                key,
                key.len() + value_len,
                self.max_bytes
            );
        }

        if let Some(&idx) = self.map.get(&key) {
            self.move_to_front(idx);
            let old_len = self.arena[idx]
                .value
                .replace(value)
                .map_or(0, |old| old.byte_len());
            self.used_bytes = self.used_bytes - old_len + value_len;
        } else {
            let cost = key.len() + value_len;
            let idx = self.alloc_slot(key.clone(), value);
            self.push_front(idx);
            self.map.insert(key, idx);
            self.used_bytes += cost;
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes && self.tail != SENTINEL {
            self.remove_oldest();
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any, and notifies the
    /// eviction callback.
    pub fn remove_oldest(&mut self) {
        if self.tail == SENTINEL {
            return;
        }

        let idx = self.tail;
        self.unlink(idx);
        let key = mem::take(&mut self.arena[idx].key);
        let value = self.arena[idx].value.take();
        self.free_slot(idx);
        self.map.remove(&key);

        let Some(value) = value else {
            return;
        };

        let cost = key.len() + value.byte_len();
        self.used_bytes -= cost;
        self.evictions += 1;
        debug!(
            "Evicted {} ({} bytes), {}/{} bytes in use",
            key, cost, self.used_bytes, self.max_bytes
        );

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(key, value);
        }
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without touching it.
    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        if self.tail == SENTINEL {
            return None;
        }
        let node = &self.arena[self.tail];
        node.value.as_ref().map(|value| (node.key.as_str(), value))
    }

    // == Iter ==
    /// Iterates from most to least recently used without touching entries.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            arena: &self.arena,
            current: self.head,
            remaining: self.map.len(),
        }
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> usize {
        self.used_bytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Number of entries evicted since construction.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    // == Recency List ==

    fn alloc_slot(&mut self, key: String, value: V) -> usize {
        let node = Node {
            key,
            value: Some(value),
            prev: SENTINEL,
            next: SENTINEL,
        };

        if self.free_head != SENTINEL {
            let idx = self.free_head;
            self.free_head = self.arena[idx].next;
            self.arena[idx] = node;
            idx
        } else {
            self.arena.push(node);
            self.arena.len() - 1
        }
    }

    fn free_slot(&mut self, idx: usize) {
        self.arena[idx].prev = SENTINEL;
        self.arena[idx].next = self.free_head;
        self.free_head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.arena[idx].prev;
        let next = self.arena[idx].next;

        if prev != SENTINEL {
            self.arena[prev].next = next;
        } else {
            self.head = next;
        }

        if next != SENTINEL {
            self.arena[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.arena[idx].prev = SENTINEL;
        self.arena[idx].next = SENTINEL;
    }

    fn push_front(&mut self, idx: usize) {
        self.arena[idx].prev = SENTINEL;
        self.arena[idx].next = self.head;

        if self.head != SENTINEL {
            self.arena[self.head].prev = idx;
        } else {
            self.tail = idx;
        }

        self.head = idx;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }
}

impl<V> fmt::Debug for Lru<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lru")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.map.len())
            .field("evictions", &self.evictions)
            .field("has_on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

// == Iterator ==
/// Most-to-least recently used iterator returned by [`Lru::iter`].
pub struct Iter<'a, V> {
    arena: &'a [Node<V>],
    current: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == SENTINEL {
            return None;
        }
        let arena = self.arena;
        let node = &arena[self.current];
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        node.value.as_ref().map(|value| (node.key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
