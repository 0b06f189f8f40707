//! Role Assembly
//!
//! Builds the router a process serves for its configured role. Remote roles
//! reach their peers over HTTP; `standalone` wires the whole deployment
//! in-process, giving every data service replica its own cache store and
//! storage backend.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::api::{self, CacheState, Gateway, StorageState};
use crate::cache::{self, CacheStore};
use crate::config::{Config, Role};
use crate::coordinator::CacheAside;
use crate::error::Result;
use crate::routing::RoutingMode;
use crate::rpc::{HttpCacheClient, HttpStorageClient, LocalCacheClient, LocalStorageClient};
use crate::services::{
    DetailApi, DetailService, RemoteDetail, RemoteReservation, RemoteReview, ReservationApi,
    ReservationService, ReviewApi, ReviewService,
};
use crate::storage::{self, DeviceType, EmulatedStore, PersistentStore, RecordStore};

/// Builds the router for `role`.
pub async fn build_router(role: Role, config: &Config) -> Result<Router> {
    match role {
        Role::Cache => Ok(api::create_cache_router(CacheState::from_config(config)?)),
        Role::Storage => {
            let store = storage::from_config(config).await?;
            Ok(api::create_storage_router(StorageState::new(store)))
        }
        Role::Detail => Ok(api::create_detail_router(Arc::new(DetailService::new(
            remote_coordinator(config)?,
        )))),
        Role::Review => Ok(api::create_review_router(Arc::new(ReviewService::new(
            remote_coordinator(config)?,
        )))),
        Role::Reservation => Ok(api::create_reservation_router(Arc::new(
            ReservationService::new(remote_coordinator(config)?),
        ))),
        Role::Gateway => Ok(api::create_gateway_router(remote_gateway(config)?)),
        Role::Standalone => Ok(api::create_gateway_router(
            standalone_gateway(config).await?,
        )),
    }
}

/// Coordinator of a data service whose cache and storage are separate services.
fn remote_coordinator(config: &Config) -> Result<CacheAside> {
    info!(
        "cache at {}, storage at {}, caching {}",
        config.cache_url,
        config.storage_url,
        if config.cache_enabled { "enabled" } else { "disabled" }
    );
    Ok(CacheAside::new(
        Arc::new(HttpCacheClient::new(&config.cache_url)?),
        Arc::new(HttpStorageClient::new(&config.storage_url)?),
        config.cache_enabled,
    ))
}

fn remote_gateway(config: &Config) -> Result<Gateway> {
    let mode: RoutingMode = config.load_balancing.parse()?;

    let details = config
        .detail_replicas
        .iter()
        .map(|url| Ok(Arc::new(RemoteDetail::new(url)?) as Arc<dyn DetailApi>))
        .collect::<Result<Vec<_>>>()?;
    let reviews = config
        .review_replicas
        .iter()
        .map(|url| Ok(Arc::new(RemoteReview::new(url)?) as Arc<dyn ReviewApi>))
        .collect::<Result<Vec<_>>>()?;
    let reservation: Arc<dyn ReservationApi> =
        Arc::new(RemoteReservation::new(&config.reservation_url)?);

    Gateway::new(mode, details, reviews, reservation)
}

/// Coordinator over a private in-process cache store and storage backend.
/// With a storage file configured, each backend gets its own file suffixed
/// with `name`.
async fn local_coordinator(config: &Config, name: &str) -> Result<CacheAside> {
    let store = CacheStore::from_name(&config.eviction_policy, config.cache_capacity)?;
    let records: Arc<dyn RecordStore> = match &config.storage_file {
        Some(path) => Arc::new(PersistentStore::open(format!("{}.{}", path, name)).await?),
        None => {
            let device: DeviceType = config.storage_device_type.parse()?;
            Arc::new(EmulatedStore::new(device))
        }
    };

    Ok(CacheAside::new(
        Arc::new(LocalCacheClient::new(cache::shared(store))),
        Arc::new(LocalStorageClient::new(records)),
        config.cache_enabled,
    ))
}

/// The whole deployment in one process: `replica_count` detail and review
/// replicas plus one reservation service behind the gateway.
pub async fn standalone_gateway(config: &Config) -> Result<Gateway> {
    let mode: RoutingMode = config.load_balancing.parse()?;

    let mut details: Vec<Arc<dyn DetailApi>> = Vec::with_capacity(config.replica_count);
    let mut reviews: Vec<Arc<dyn ReviewApi>> = Vec::with_capacity(config.replica_count);
    for replica in 1..=config.replica_count {
        let detail = local_coordinator(config, &format!("detail-{}", replica)).await?;
        details.push(Arc::new(DetailService::new(detail)));
        let review = local_coordinator(config, &format!("review-{}", replica)).await?;
        reviews.push(Arc::new(ReviewService::new(review)));
    }
    let reservation = Arc::new(ReservationService::new(
        local_coordinator(config, "reservation").await?,
    ));

    Gateway::new(mode, details, reviews, reservation)
}
