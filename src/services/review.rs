//! Reviews, stored as one collection per restaurant.
//!
//! Posting a review is a read-modify-write of the whole collection. Two
//! concurrent posts to the same restaurant may race and one review may be
//! lost; the deployment accepts that.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::CacheAside;
use crate::error::{Result, WelpError};
use crate::models::StatusResponse;
use crate::rpc::HttpPeer;
use crate::services::{require, ReviewApi};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user_name: String,
    pub restaurant_name: String,
    pub review: String,
    pub rating: i32,
}

/// All reviews of one restaurant, keyed by author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCollection {
    pub reviews: BTreeMap<String, Review>,
}

impl ReviewCollection {
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn get(&self, user_name: &str) -> Option<&Review> {
        self.reviews.get(user_name)
    }

    pub fn upsert(&mut self, review: Review) {
        self.reviews.insert(review.user_name.clone(), review);
    }
}

// == Review Service ==
#[derive(Clone)]
pub struct ReviewService {
    data: CacheAside,
}

impl ReviewService {
    pub fn new(data: CacheAside) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ReviewApi for ReviewService {
    async fn get_review(&self, restaurant_name: &str, user_name: &str) -> Result<Review> {
        require("restaurant_name", restaurant_name)?;
        require("user_name", user_name)?;

        let collection: ReviewCollection = self.data.read(restaurant_name).await?;
        collection.get(user_name).cloned().ok_or_else(|| {
            WelpError::NotFound(format!("{} has no review by {}", restaurant_name, user_name))
        })
    }

    async fn search_reviews(&self, restaurant_name: &str) -> Result<ReviewCollection> {
        require("restaurant_name", restaurant_name)?;
        self.data.read(restaurant_name).await
    }

    async fn post_review(&self, review: Review) -> Result<()> {
        require("restaurant_name", &review.restaurant_name)?;
        require("user_name", &review.user_name)?;

        let key = review.restaurant_name.clone();
        let mut collection: ReviewCollection = self.data.read_or_default(&key).await?;
        info!(restaurant = %key, user = %review.user_name, "review posted");
        collection.upsert(review);
        self.data.write(&key, &collection).await
    }
}

// == Remote Review ==
/// A review replica reached over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteReview {
    peer: HttpPeer,
}

impl RemoteReview {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            peer: HttpPeer::new(base_url)?,
        })
    }
}

#[async_trait]
impl ReviewApi for RemoteReview {
    async fn get_review(&self, restaurant_name: &str, user_name: &str) -> Result<Review> {
        self.peer
            .get(&["reviews", restaurant_name, user_name])
            .await
    }

    async fn search_reviews(&self, restaurant_name: &str) -> Result<ReviewCollection> {
        self.peer.get(&["reviews", restaurant_name]).await
    }

    async fn post_review(&self, review: Review) -> Result<()> {
        let _: StatusResponse = self.peer.post(&["reviews"], &review).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::CacheClient;
    use crate::services::testing::backing;
    use crate::storage::RecordStore;

    fn review(user: &str, restaurant: &str, rating: i32) -> Review {
        Review {
            user_name: user.to_string(),
            restaurant_name: restaurant.to_string(),
            review: format!("{} liked it", user),
            rating,
        }
    }

    #[tokio::test]
    async fn test_first_review_creates_collection() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());

        service.post_review(review("alice", "Nopa", 5)).await.unwrap();

        let found = service.get_review("Nopa", "alice").await.unwrap();
        assert_eq!(found, review("alice", "Nopa", 5));
        assert_eq!(service.search_reviews("Nopa").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reviews_accumulate_per_restaurant() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());

        service.post_review(review("alice", "Nopa", 5)).await.unwrap();
        service.post_review(review("bob", "Nopa", 3)).await.unwrap();
        service.post_review(review("carol", "Zuni", 4)).await.unwrap();

        let nopa = service.search_reviews("Nopa").await.unwrap();
        assert_eq!(nopa.len(), 2);
        assert_eq!(nopa.get("bob").unwrap().rating, 3);
        assert_eq!(service.search_reviews("Zuni").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_repost_replaces_author_review() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());

        service.post_review(review("alice", "Nopa", 5)).await.unwrap();
        service.post_review(review("alice", "Nopa", 2)).await.unwrap();

        let nopa = service.search_reviews("Nopa").await.unwrap();
        assert_eq!(nopa.len(), 1);
        assert_eq!(nopa.get("alice").unwrap().rating, 2);
    }

    #[tokio::test]
    async fn test_collection_is_one_entry() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());
        service.post_review(review("alice", "Nopa", 5)).await.unwrap();
        service.post_review(review("bob", "Nopa", 4)).await.unwrap();

        let cached = b.cache.get_item("Nopa").await.unwrap();
        let stored = b.storage.get("Nopa").await.unwrap().unwrap();
        assert_eq!(cached.value, stored.value);

        let decoded: ReviewCollection = serde_json::from_slice(&stored.value).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_author_is_not_found() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());
        service.post_review(review("alice", "Nopa", 5)).await.unwrap();

        assert!(service
            .get_review("Nopa", "mallory")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service
            .get_review("Unknown", "alice")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(service
            .search_reviews("Unknown")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_works_without_cache() {
        let b = backing(false);
        let service = ReviewService::new(b.coordinator.clone());
        service.post_review(review("alice", "Nopa", 5)).await.unwrap();
        service.post_review(review("bob", "Nopa", 1)).await.unwrap();

        assert_eq!(service.search_reviews("Nopa").await.unwrap().len(), 2);
        assert!(b.cache.get_item("Nopa").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let b = backing(true);
        let service = ReviewService::new(b.coordinator.clone());

        assert!(matches!(
            service.post_review(review("", "Nopa", 5)).await,
            Err(WelpError::InvalidRequest(_))
        ));
        assert!(matches!(
            service.get_review("Nopa", "").await,
            Err(WelpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_collection_json_shape() {
        let mut collection = ReviewCollection::default();
        collection.upsert(review("alice", "Nopa", 5));

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["reviews"]["alice"]["rating"], 5);
        assert_eq!(json["reviews"]["alice"]["restaurant_name"], "Nopa");
    }
}
