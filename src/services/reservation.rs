//! Reservations, one per user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coordinator::CacheAside;
use crate::error::Result;
use crate::models::StatusResponse;
use crate::rpc::HttpPeer;
use crate::services::{require, ReservationApi};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDate {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub user_name: String,
    pub restaurant_name: String,
    pub date: ReservationDate,
}

// == Reservation Service ==
#[derive(Clone)]
pub struct ReservationService {
    data: CacheAside,
}

impl ReservationService {
    pub fn new(data: CacheAside) -> Self {
        Self { data }
    }
}

#[async_trait]
impl ReservationApi for ReservationService {
    async fn get_reservation(&self, user_name: &str) -> Result<Reservation> {
        require("user_name", user_name)?;
        self.data.read(user_name).await
    }

    async fn make_reservation(&self, reservation: Reservation) -> Result<()> {
        require("user_name", &reservation.user_name)?;
        require("restaurant_name", &reservation.restaurant_name)?;
        self.data.write(&reservation.user_name, &reservation).await?;
        info!(
            user = %reservation.user_name,
            restaurant = %reservation.restaurant_name,
            "reservation made"
        );
        Ok(())
    }
}

// == Remote Reservation ==
#[derive(Debug, Clone)]
pub struct RemoteReservation {
    peer: HttpPeer,
}

impl RemoteReservation {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            peer: HttpPeer::new(base_url)?,
        })
    }
}

#[async_trait]
impl ReservationApi for RemoteReservation {
    async fn get_reservation(&self, user_name: &str) -> Result<Reservation> {
        self.peer.get(&["reservations", user_name]).await
    }

    async fn make_reservation(&self, reservation: Reservation) -> Result<()> {
        let _: StatusResponse = self.peer.post(&["reservations"], &reservation).await?;
        Ok(())
    }
}
