//! Core trait for the cache store.
//!
//! # Design Principles
//!
//! - **String keys**: human-readable in logs, flexible for any domain
//! - **`Vec<u8>` values**: raw bytes, no serialization opinions imposed
//! - **Identifier index**: one named set tracking which keys are
//!   expected to be present, so callers can detect partial cache state
//! - **Dyn-compatible**: `Pin<Box<dyn Future>>` for trait object support
//!
//! # Atomicity
//!
//! Every operation is atomic at the key level. Multi-key sequences
//! (clear index, delete keys, repopulate) are *not* transactional;
//! callers that need stronger guarantees must document the window.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error from a backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache store is shutting down.
    #[error("cache is shutting down")]
    ShuttingDown,

    /// Provider-specific error.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Key-value store with an identifier index, shared by all cache
/// providers.
///
/// The index is an auxiliary set naming the keys a complete cache is
/// expected to hold. The invariant is soft: an indexed key may be
/// missing its entry (eviction, TTL expiry), and consumers treat that
/// as a staleness signal rather than an error.
///
/// All implementations must be `Send + Sync` for use across async
/// tasks, and all methods return boxed futures so the trait can be
/// held as `Arc<dyn CacheStore>`.
pub trait CacheStore: Send + Sync {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>>;

    /// Store a value, replacing any existing entry for the key.
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Delete a value by key.
    ///
    /// Returns `Ok(true)` if the key existed.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// All identifiers currently in the index, in unspecified order.
    fn index_members(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>>;

    /// Add an identifier to the index. Idempotent.
    fn index_add(&self, id: &str) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Remove an identifier from the index.
    ///
    /// Returns `Ok(true)` if it was present.
    fn index_remove(&self, id: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Drop every identifier from the index, leaving values untouched.
    fn index_clear(&self) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Number of value entries currently held.
    fn entry_count(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display() {
        let err = CacheError::ShuttingDown;
        assert_eq!(format!("{}", err), "cache is shutting down");

        let err = CacheError::Provider("backend gone".to_string());
        assert!(format!("{}", err).contains("backend gone"));
    }

    #[test]
    fn test_cache_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let cache_err: CacheError = io_err.into();
        assert!(matches!(cache_err, CacheError::Io(_)));
    }
}
