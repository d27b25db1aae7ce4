//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub detail: String,
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "This is get request".to_string(),
            detail: "I am coming from server".to_string(),
        }
    }
}

/// Response body for a cache hit (GET /get)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The stored value
    pub value: String,
    /// Always true for a hit
    pub found: bool,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            found: true,
        }
    }
}

/// Response body for a cache miss (GET /get)
#[derive(Debug, Clone, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
    /// Always false for a miss
    pub found: bool,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            message: "key not present in cache".to_string(),
            found: false,
        }
    }
}

/// Response body for the SET operation (GET /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            message: "Key updated in cache".to_string(),
            key: key.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
