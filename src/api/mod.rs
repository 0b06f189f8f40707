//! API Module
//!
//! HTTP handlers and routers for every welp role.
//!
//! # Surfaces
//! - cache: `GET /items/:key`, `PUT /items`, `DELETE /items/:key`, `GET /stats`
//! - storage: `GET /records/:key`, `PUT /records`, `DELETE /records/:key`
//! - detail, review, reservation data services
//! - gateway: the public query-string endpoints
//!
//! Every router also serves `GET /health`.

pub mod cache;
pub mod gateway;
pub mod services;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::models::HealthResponse;

pub use cache::{create_cache_router, CacheState};
pub use gateway::{create_gateway_router, Gateway};
pub use services::{create_detail_router, create_reservation_router, create_review_router};
pub use storage::{create_storage_router, StorageState};

/// `GET /health` for the named role.
fn health<S>(service: &'static str) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(move || async move { Json(HealthResponse::healthy(service)) })
}

/// CORS, request tracing and an unbounded JSON body, shared by every router.
/// Cached and stored payloads have no size ceiling.
fn with_middleware(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
