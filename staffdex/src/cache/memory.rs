//! In-memory cache store backed by moka.
//!
//! Values live in a `moka::future::Cache` weighted by entry size, which
//! gives lock-free reads, concurrent writes, and automatic LRU
//! eviction within a byte budget. The identifier index is a separate
//! `DashSet`: it must never evict on its own, because a shrinking
//! index would mask the partial-cache condition the index exists to
//! reveal. An index entry outliving its evicted value is expected and
//! is exactly the signal consumers look for.

use std::time::Duration;

use dashmap::DashSet;
use moka::future::Cache as MokaCache;

use crate::cache::traits::{BoxFuture, CacheError, CacheStore};

/// In-memory [`CacheStore`] provider.
///
/// Safe for use across async tasks; all interior state is lock-free.
pub struct MemoryCacheStore {
    /// Keyed employee entries.
    entries: MokaCache<String, Vec<u8>>,

    /// Identifier index. Grows and shrinks only by explicit index
    /// operations, never by eviction.
    index: DashSet<String>,
}

impl MemoryCacheStore {
    /// Create a new memory store.
    ///
    /// # Arguments
    ///
    /// * `max_size_bytes` - maximum total size of cached values
    /// * `ttl` - optional time-to-live for value entries
    pub fn new(max_size_bytes: u64, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder()
            // Weight each entry by its serialized size
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                value.len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes);

        if let Some(ttl_duration) = ttl {
            builder = builder.time_to_live(ttl_duration);
        }

        Self {
            entries: builder.build(),
            index: DashSet::new(),
        }
    }

    /// Run pending moka maintenance so `entry_count` reflects recent
    /// writes. Useful in tests; never required for correctness.
    pub async fn sync(&self) {
        self.entries.run_pending_tasks().await;
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.entries.get(&key).await) })
    }

    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.entries.insert(key, value).await;
            Ok(())
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.entries.remove(&key).await.is_some()) })
    }

    fn index_members(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>> {
        Box::pin(async move { Ok(self.index.iter().map(|id| id.key().clone()).collect()) })
    }

    fn index_add(&self, id: &str) -> BoxFuture<'_, Result<(), CacheError>> {
        let id = id.to_string();
        Box::pin(async move {
            self.index.insert(id);
            Ok(())
        })
    }

    fn index_remove(&self, id: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.index.remove(&id).is_some()) })
    }

    fn index_clear(&self) -> BoxFuture<'_, Result<(), CacheError>> {
        Box::pin(async move {
            self.index.clear();
            Ok(())
        })
    }

    fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}
