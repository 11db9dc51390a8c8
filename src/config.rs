//! Configuration Module
//!
//! Handles loading the cache byte budget from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Environment variable holding the byte budget.
pub const MAX_BYTES_VAR: &str = "CACHE_MAX_BYTES";

/// Byte budget used when nothing is configured (64 MiB).
pub const DEFAULT_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum combined size of keys and values in bytes, 0 = unbounded
    pub max_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_BYTES` - Byte budget (default: 64 MiB, `0` disables eviction)
    ///
    /// A value that is not a non-negative integer, such as `-1`, is rejected
    /// rather than clamped.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_bytes = match lookup(MAX_BYTES_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| CacheError::InvalidCapacity {
                    var: MAX_BYTES_VAR.to_string(),
                    value: raw.clone(),
                })?,
            None => DEFAULT_MAX_BYTES,
        };

        Ok(Self { max_bytes })
    }

    /// Config with no byte limit.
    pub fn unbounded() -> Self {
        Self { max_bytes: 0 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}
