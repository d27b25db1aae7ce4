//! Request DTOs for the cache server API
//!
//! Defines the query parameters accepted by each endpoint.

use std::time::Duration;

use serde::Deserialize;

use super::duration::{parse_duration, DurationError};

/// Query parameters for the SET operation (GET /set)
///
/// Missing `key` or `value` default to the empty string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetQuery {
    /// The cache key
    #[serde(default)]
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: String,
    /// Optional time-to-live, e.g. `30s` or `1h30m`
    #[serde(default)]
    pub duration: Option<String>,
}

impl SetQuery {
    /// Parses the `duration` parameter, if one was supplied.
    pub fn ttl(&self) -> Result<Option<Duration>, DurationError> {
        self.duration.as_deref().map(parse_duration).transpose()
    }
}

/// Query parameters for the GET operation (GET /get)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetQuery {
    /// The cache key
    #[serde(default)]
    pub key: String,
}
