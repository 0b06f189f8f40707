//! Services Module
//!
//! The three data-owning services of the deployment. Each one keeps its
//! domain objects as JSON payloads behind a `CacheAside` coordinator and is
//! reachable in-process or over HTTP through the same trait.
//!
//! | Service | Cache/storage key | Payload |
//! |---|---|---|
//! | detail | restaurant name | `RestaurantDetail` |
//! | review | restaurant name | `ReviewCollection` |
//! | reservation | user name | `Reservation` |

mod detail;
mod reservation;
mod review;

use async_trait::async_trait;

use crate::error::{Result, WelpError};

pub use detail::{DetailService, RemoteDetail, RestaurantDetail};
pub use reservation::{RemoteReservation, Reservation, ReservationDate, ReservationService};
pub use review::{RemoteReview, Review, ReviewCollection, ReviewService};

#[async_trait]
pub trait DetailApi: Send + Sync {
    async fn get_detail(&self, restaurant_name: &str) -> Result<RestaurantDetail>;
    async fn post_detail(&self, detail: RestaurantDetail) -> Result<()>;
}

#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// The review `user_name` left for `restaurant_name`.
    async fn get_review(&self, restaurant_name: &str, user_name: &str) -> Result<Review>;
    /// Every review of `restaurant_name`, keyed by user.
    async fn search_reviews(&self, restaurant_name: &str) -> Result<ReviewCollection>;
    /// Adds or replaces the author's review of the restaurant.
    async fn post_review(&self, review: Review) -> Result<()>;
}

#[async_trait]
pub trait ReservationApi: Send + Sync {
    async fn get_reservation(&self, user_name: &str) -> Result<Reservation>;
    /// Stores the user's reservation, replacing any previous one.
    async fn make_reservation(&self, reservation: Reservation) -> Result<()>;
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WelpError::InvalidRequest(format!("{} cannot be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::cache::{self, CacheStore, PolicyKind};
    use crate::coordinator::CacheAside;
    use crate::rpc::{LocalCacheClient, LocalStorageClient};
    use crate::storage::{DeviceType, EmulatedStore};

    /// In-process coordinator plus handles on its cache and storage.
    pub struct Backing {
        pub cache: LocalCacheClient,
        pub storage: Arc<EmulatedStore>,
        pub coordinator: CacheAside,
    }

    pub fn backing(cache_enabled: bool) -> Backing {
        let cache = LocalCacheClient::new(cache::shared(
            CacheStore::new(PolicyKind::Lru, 16).unwrap(),
        ));
        let storage = Arc::new(EmulatedStore::new(DeviceType::Ssd));
        let coordinator = CacheAside::new(
            Arc::new(cache.clone()),
            Arc::new(LocalStorageClient::new(storage.clone())),
            cache_enabled,
        );
        Backing {
            cache,
            storage,
            coordinator,
        }
    }
}
