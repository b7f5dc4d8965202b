//! HTTP routes.
//!
//! - `GET /data` - cached sheet records
//! - `GET /refresh` - refetch and replace the cache
//! - `GET /health` - liveness check

pub mod data;
pub mod health;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::cache_service::{CacheService, RecordSource};

/// Application state shared across handlers.
pub struct AppState<S> {
    pub cache: Arc<CacheService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Builds the router over a shared cache.
pub fn router<S: RecordSource + 'static>(cache: Arc<CacheService<S>>) -> Router {
    Router::new()
        .route("/data", get(data::get_data::<S>))
        .route("/refresh", get(data::refresh::<S>))
        .route("/health", get(health::check))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { cache })
}
