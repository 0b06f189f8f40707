//! Cache service handlers.

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::cache::{CacheItem, CacheStore, SharedCacheStore};
use crate::error::{Result, WelpError};
use crate::models::{StatsResponse, SuccessResponse};

/// Application state shared across the cache handlers.
#[derive(Clone)]
pub struct CacheState {
    /// Single lock around the store; every operation, eviction included, runs under it
    pub cache: SharedCacheStore,
}

impl CacheState {
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: crate::cache::shared(cache),
        }
    }

    /// Builds the store from `EVICTION_POLICY` and `CACHE_CAPACITY`.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = CacheStore::from_name(&config.eviction_policy, config.cache_capacity)?;
        Ok(Self::new(cache))
    }
}

/// Handler for GET /items/:key
pub async fn get_item(
    State(state): State<CacheState>,
    Path(key): Path<String>,
) -> Result<Json<CacheItem>> {
    // Lock is exclusive: a lookup updates recency, frequency and counters
    let mut cache = state.cache.lock().await;
    Ok(Json(cache.get(&key)?))
}

/// Handler for PUT /items
pub async fn put_item(
    State(state): State<CacheState>,
    Json(item): Json<CacheItem>,
) -> Result<Json<SuccessResponse>> {
    if item.key.is_empty() {
        return Err(WelpError::InvalidRequest("Key cannot be empty".to_string()));
    }

    let mut cache = state.cache.lock().await;
    cache.set(item);
    Ok(Json(SuccessResponse::ok()))
}

/// Handler for DELETE /items/:key
pub async fn delete_item(
    State(state): State<CacheState>,
    Path(key): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let mut cache = state.cache.lock().await;
    cache.delete(&key)?;
    Ok(Json(SuccessResponse::ok()))
}

/// Handler for GET /stats
pub async fn stats(State(state): State<CacheState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    Json(cache.stats().into())
}

pub fn create_cache_router(state: CacheState) -> Router {
    let router = Router::new()
        .route("/items", put(put_item))
        .route("/items/:key", get(get_item).delete(delete_item))
        .route("/stats", get(stats))
        .route("/health", super::health("cache"))
        .with_state(state);

    super::with_middleware(router)
}
