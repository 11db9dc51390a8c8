//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Lookups never fail; a missing key is reported as `None`. Only
/// configuration can produce an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity is not a non-negative byte count
    #[error("Invalid capacity for {var}: {value:?} is not a non-negative byte count")]
    InvalidCapacity { var: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
