//! Request DTOs for the gateway
//!
//! The gateway takes every argument from the query string. Fields arrive as
//! optional strings and are checked here, so a missing or unparsable
//! parameter becomes a malformed-request error instead of an extractor
//! rejection.

use serde::Deserialize;

use crate::services::{Reservation, ReservationDate, RestaurantDetail, Review};

fn text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn number(value: Option<String>) -> Option<i32> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Query for `/get-detail` and `/search-reviews`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestaurantQuery {
    pub restaurant_name: Option<String>,
}

impl RestaurantQuery {
    pub fn restaurant_name(self) -> Option<String> {
        text(self.restaurant_name)
    }
}

/// Query for `/post-detail`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDetailQuery {
    pub restaurant_name: Option<String>,
    pub location: Option<String>,
    pub style: Option<String>,
    pub capacity: Option<String>,
}

impl PostDetailQuery {
    pub fn into_detail(self) -> Option<RestaurantDetail> {
        Some(RestaurantDetail {
            restaurant_name: text(self.restaurant_name)?,
            location: text(self.location)?,
            style: text(self.style)?,
            capacity: number(self.capacity)?,
        })
    }
}

/// Query for `/get-review`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetReviewQuery {
    pub restaurant_name: Option<String>,
    pub user_name: Option<String>,
}

impl GetReviewQuery {
    /// `(restaurant_name, user_name)`
    pub fn into_parts(self) -> Option<(String, String)> {
        Some((text(self.restaurant_name)?, text(self.user_name)?))
    }
}

/// Query for `/post-review`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostReviewQuery {
    pub user_name: Option<String>,
    pub restaurant_name: Option<String>,
    pub review: Option<String>,
    pub rating: Option<String>,
}

impl PostReviewQuery {
    pub fn into_review(self) -> Option<Review> {
        Some(Review {
            user_name: text(self.user_name)?,
            restaurant_name: text(self.restaurant_name)?,
            review: text(self.review)?,
            rating: number(self.rating)?,
        })
    }
}

/// Query for `/get-reservation`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub user_name: Option<String>,
}

impl UserQuery {
    pub fn user_name(self) -> Option<String> {
        text(self.user_name)
    }
}

/// Query for `/make-reservation`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MakeReservationQuery {
    pub user_name: Option<String>,
    pub restaurant_name: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

impl MakeReservationQuery {
    pub fn into_reservation(self) -> Option<Reservation> {
        Some(Reservation {
            user_name: text(self.user_name)?,
            restaurant_name: text(self.restaurant_name)?,
            date: ReservationDate {
                year: number(self.year)?,
                month: number(self.month)?,
                day: number(self.day)?,
            },
        })
    }
}
