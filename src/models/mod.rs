//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing HTTP response bodies.

pub mod duration;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use duration::{parse_duration, DurationError};
pub use requests::{GetQuery, SetQuery};
pub use responses::{GetResponse, HealthResponse, NotFoundResponse, RootResponse, SetResponse};
