//! Restaurant details, keyed by restaurant name.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::CacheAside;
use crate::error::Result;
use crate::models::StatusResponse;
use crate::rpc::HttpPeer;
use crate::services::{require, DetailApi};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantDetail {
    pub restaurant_name: String,
    pub location: String,
    pub style: String,
    pub capacity: i32,
}

// == Detail Service ==
#[derive(Clone)]
pub struct DetailService {
    data: CacheAside,
}

impl DetailService {
    pub fn new(data: CacheAside) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DetailApi for DetailService {
    async fn get_detail(&self, restaurant_name: &str) -> Result<RestaurantDetail> {
        require("restaurant_name", restaurant_name)?;
        self.data.read(restaurant_name).await
    }

    async fn post_detail(&self, detail: RestaurantDetail) -> Result<()> {
        require("restaurant_name", &detail.restaurant_name)?;
        self.data.write(&detail.restaurant_name, &detail).await?;
        info!(restaurant = %detail.restaurant_name, "detail saved");
        Ok(())
    }
}

// == Remote Detail ==
/// A detail replica reached over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteDetail {
    peer: HttpPeer,
}

impl RemoteDetail {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            peer: HttpPeer::new(base_url)?,
        })
    }
}

#[async_trait]
impl DetailApi for RemoteDetail {
    async fn get_detail(&self, restaurant_name: &str) -> Result<RestaurantDetail> {
        self.peer.get(&["detail", restaurant_name]).await
    }

    async fn post_detail(&self, detail: RestaurantDetail) -> Result<()> {
        let _: StatusResponse = self.peer.post(&["detail"], &detail).await?;
        Ok(())
    }
}
