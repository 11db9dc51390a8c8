//! Value Module
//!
//! Defines the size-reporting capability every cached value must provide.

use std::sync::Arc;

// == Value ==
/// A cacheable payload that can report how many bytes it occupies.
///
/// The byte length is charged against the cache budget together with the
/// length of the entry's key.
pub trait Value {
    /// Number of bytes this value accounts for.
    fn byte_len(&self) -> usize;
}

impl Value for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for &'static str {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Arc<str> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for &'static [u8] {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Box<[u8]> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl Value for Arc<[u8]> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}
