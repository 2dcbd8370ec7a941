//! Cache store abstraction and providers.
//!
//! The store is byte-oriented and domain-agnostic: string keys,
//! `Vec<u8>` values, plus a single identifier index set the consistency
//! engine uses to judge cache completeness. Serialization is the
//! engine's concern, not the store's.

mod memory;
mod traits;

pub use memory::MemoryCacheStore;
pub use traits::{BoxFuture, CacheError, CacheStore};
