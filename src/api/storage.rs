//! Storage service handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::error::{Result, WelpError};
use crate::models::SuccessResponse;
use crate::storage::{DatabaseRecord, RecordStore};

#[derive(Clone)]
pub struct StorageState {
    pub store: Arc<dyn RecordStore>,
}

impl StorageState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

/// Handler for GET /records/:key
pub async fn get_record(
    State(state): State<StorageState>,
    Path(key): Path<String>,
) -> Result<Json<DatabaseRecord>> {
    match state.store.get(&key).await? {
        Some(record) => Ok(Json(record)),
        None => Err(WelpError::NotFound(key)),
    }
}

/// Handler for PUT /records
pub async fn put_record(
    State(state): State<StorageState>,
    Json(record): Json<DatabaseRecord>,
) -> Result<Json<SuccessResponse>> {
    if record.key.is_empty() {
        return Err(WelpError::InvalidRequest("Key cannot be empty".to_string()));
    }
    state.store.set(record).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Handler for DELETE /records/:key. Deleting an absent record succeeds.
pub async fn delete_record(
    State(state): State<StorageState>,
    Path(key): Path<String>,
) -> Result<Json<SuccessResponse>> {
    state.store.delete(&key).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn create_storage_router(state: StorageState) -> Router {
    let router = Router::new()
        .route("/records", put(put_record))
        .route("/records/:key", get(get_record).delete(delete_record))
        .route("/health", super::health("storage"))
        .with_state(state);

    super::with_middleware(router)
}
