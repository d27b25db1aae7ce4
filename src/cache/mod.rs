//! Cache Module
//!
//! Provides an in-memory key/value cache with optional per-entry TTL.
//! Expiry is checked lazily on every read; physical removal is left to the
//! background sweeper (see [`crate::tasks`]).

mod entry;
mod handle;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Expiry};
pub use handle::Cache;
pub use store::CacheStore;
