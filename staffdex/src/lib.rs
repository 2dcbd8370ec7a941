//! Staffdex - cached proxy for a rate-limited employee directory.
//!
//! The upstream directory API throttles aggressively and occasionally
//! serves incomplete data. Staffdex fronts it with a read-through /
//! write-through cache and presents a stable query surface: list,
//! search, get-by-id, salary aggregates, create, delete.
//!
//! # Architecture
//!
//! ```text
//! caller -> DirectoryService -> { CacheStore | DirectoryClient } -> upstream
//!                 |
//!                 +-> query (pure aggregation over resolved collections)
//! ```
//!
//! The interesting part is [`service::DirectoryService`], the
//! consistency engine: it decides when the cache is authoritative
//! (population-count check against the identifier index), repairs
//! partial cache state with a full refresh, and absorbs upstream
//! throttling through the client's bounded retry policy without ever
//! corrupting cached state.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod service;
pub mod telemetry;

/// Crate version, for banners and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
