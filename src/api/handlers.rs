//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Handlers translate
//! query strings into cache calls and cache results into JSON.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::Cache;
use crate::error::Result;
use crate::models::{
    GetQuery, GetResponse, HealthResponse, NotFoundResponse, RootResponse, SetQuery, SetResponse,
};

/// Application state shared across all handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Shared cache handle
    pub cache: Cache,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

/// Handler for GET /
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// Handler for GET /set?key=&value=[&duration=]
///
/// The write completes before the response is sent, so a caller that waits
/// for the response observes its own writes in order. Nothing is written
/// when `duration` fails to parse.
pub async fn set_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SetQuery>, QueryRejection>,
) -> Result<Json<SetResponse>> {
    let Query(query) = query?;

    match query.ttl()? {
        Some(ttl) => {
            debug!(key = %query.key, ?ttl, "set with ttl");
            state.cache.set_with_ttl(query.key.clone(), query.value, ttl);
        }
        None => {
            debug!(key = %query.key, "set");
            state.cache.set(query.key.clone(), query.value);
        }
    }

    Ok(Json(SetResponse::new(query.key)))
}

/// Handler for GET /get?key=
///
/// Responds 404 when the key is absent or expired.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query?;

    let response = match state.cache.get(&query.key) {
        Some(value) => Json(GetResponse::new(value)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(NotFoundResponse::default())).into_response(),
    };

    Ok(response)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
