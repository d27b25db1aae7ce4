//! TTL Cache - An in-process key/value cache with per-entry expiry
//!
//! Reads check expiry lazily; a cancellable background sweeper reclaims
//! expired entries. An HTTP layer exposes set/get over query strings.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use tasks::{spawn_sweeper, SweeperHandle};
