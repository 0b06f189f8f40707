//! Gateway
//!
//! Public entry point. Parses query-string requests, picks the replica that
//! owns the key and forwards the call. Detail and review traffic is sharded
//! by restaurant name, each with its own routing table; reservations go to
//! the single reservation service.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, info};

use crate::error::{Result, WelpError};
use crate::models::{
    GetReviewQuery, MakeReservationQuery, PostDetailQuery, PostReviewQuery, RestaurantQuery,
    StatusResponse, UserQuery,
};
use crate::routing::{ReplicaRouter, RoutingMode};
use crate::services::{
    DetailApi, Reservation, ReservationApi, RestaurantDetail, Review, ReviewApi, ReviewCollection,
};

// == Gateway State ==
#[derive(Clone)]
pub struct Gateway {
    details: Arc<[Arc<dyn DetailApi>]>,
    reviews: Arc<[Arc<dyn ReviewApi>]>,
    reservation: Arc<dyn ReservationApi>,
    detail_router: Arc<ReplicaRouter>,
    review_router: Arc<ReplicaRouter>,
}

impl Gateway {
    /// The replica count of each table is the number of replicas given.
    pub fn new(
        mode: RoutingMode,
        details: Vec<Arc<dyn DetailApi>>,
        reviews: Vec<Arc<dyn ReviewApi>>,
        reservation: Arc<dyn ReservationApi>,
    ) -> Result<Self> {
        let detail_router = ReplicaRouter::new(mode, details.len())?;
        let review_router = ReplicaRouter::new(mode, reviews.len())?;
        info!(
            "gateway routing: {} across {} detail and {} review replicas",
            mode,
            details.len(),
            reviews.len()
        );

        Ok(Self {
            details: details.into(),
            reviews: reviews.into(),
            reservation,
            detail_router: Arc::new(detail_router),
            review_router: Arc::new(review_router),
        })
    }

    /// Replica number and handle for a detail key.
    pub fn detail_replica(&self, restaurant_name: &str) -> (usize, &Arc<dyn DetailApi>) {
        let replica = self.detail_router.route(restaurant_name);
        (replica, &self.details[replica - 1])
    }

    /// Replica number and handle for a review key.
    pub fn review_replica(&self, restaurant_name: &str) -> (usize, &Arc<dyn ReviewApi>) {
        let replica = self.review_router.route(restaurant_name);
        (replica, &self.reviews[replica - 1])
    }
}

fn malformed(endpoint: &str) -> WelpError {
    WelpError::InvalidRequest(format!("Malformed request to `/{}` endpoint!", endpoint))
}

fn log_request(endpoint: &str, start: Instant, replica: usize) {
    debug!(
        endpoint,
        replica,
        elapsed_us = start.elapsed().as_micros() as u64,
        "request served"
    );
}

// == Handlers ==
/// Handler for /get-detail?restaurant_name=
pub async fn get_detail(
    State(gateway): State<Gateway>,
    query: Option<Query<RestaurantQuery>>,
) -> Result<Json<RestaurantDetail>> {
    let start = Instant::now();
    let name = query
        .and_then(|Query(q)| q.restaurant_name())
        .ok_or_else(|| malformed("get-detail"))?;

    let (replica, api) = gateway.detail_replica(&name);
    let detail = api.get_detail(&name).await?;
    log_request("get-detail", start, replica);
    Ok(Json(detail))
}

/// Handler for /post-detail?restaurant_name=&location=&style=&capacity=
pub async fn post_detail(
    State(gateway): State<Gateway>,
    query: Option<Query<PostDetailQuery>>,
) -> Result<Json<StatusResponse>> {
    let start = Instant::now();
    let detail = query
        .and_then(|Query(q)| q.into_detail())
        .ok_or_else(|| malformed("post-detail"))?;

    let (replica, api) = gateway.detail_replica(&detail.restaurant_name);
    api.post_detail(detail).await?;
    log_request("post-detail", start, replica);
    Ok(Json(StatusResponse::ok()))
}

/// Handler for /get-review?restaurant_name=&user_name=
pub async fn get_review(
    State(gateway): State<Gateway>,
    query: Option<Query<GetReviewQuery>>,
) -> Result<Json<Review>> {
    let start = Instant::now();
    let (restaurant, user) = query
        .and_then(|Query(q)| q.into_parts())
        .ok_or_else(|| malformed("get-review"))?;

    let (replica, api) = gateway.review_replica(&restaurant);
    let review = api.get_review(&restaurant, &user).await?;
    log_request("get-review", start, replica);
    Ok(Json(review))
}

/// Handler for /post-review?user_name=&restaurant_name=&review=&rating=
pub async fn post_review(
    State(gateway): State<Gateway>,
    query: Option<Query<PostReviewQuery>>,
) -> Result<Json<StatusResponse>> {
    let start = Instant::now();
    let review = query
        .and_then(|Query(q)| q.into_review())
        .ok_or_else(|| malformed("post-review"))?;

    let (replica, api) = gateway.review_replica(&review.restaurant_name);
    api.post_review(review).await?;
    log_request("post-review", start, replica);
    Ok(Json(StatusResponse::ok()))
}

/// Handler for /search-reviews?restaurant_name=
pub async fn search_reviews(
    State(gateway): State<Gateway>,
    query: Option<Query<RestaurantQuery>>,
) -> Result<Json<ReviewCollection>> {
    let start = Instant::now();
    let name = query
        .and_then(|Query(q)| q.restaurant_name())
        .ok_or_else(|| malformed("search-reviews"))?;

    let (replica, api) = gateway.review_replica(&name);
    let reviews = api.search_reviews(&name).await?;
    log_request("search-reviews", start, replica);
    Ok(Json(reviews))
}

/// Handler for /get-reservation?user_name=
pub async fn get_reservation(
    State(gateway): State<Gateway>,
    query: Option<Query<UserQuery>>,
) -> Result<Json<Reservation>> {
    let start = Instant::now();
    let user = query
        .and_then(|Query(q)| q.user_name())
        .ok_or_else(|| malformed("get-reservation"))?;

    let reservation = gateway.reservation.get_reservation(&user).await?;
    log_request("get-reservation", start, 1);
    Ok(Json(reservation))
}

/// Handler for /make-reservation?user_name=&restaurant_name=&year=&month=&day=
pub async fn make_reservation(
    State(gateway): State<Gateway>,
    query: Option<Query<MakeReservationQuery>>,
) -> Result<Json<StatusResponse>> {
    let start = Instant::now();
    let reservation = query
        .and_then(|Query(q)| q.into_reservation())
        .ok_or_else(|| malformed("make-reservation"))?;

    gateway.reservation.make_reservation(reservation).await?;
    log_request("make-reservation", start, 1);
    Ok(Json(StatusResponse::ok()))
}

/// Creates the gateway router. Write endpoints accept GET and POST, since
/// every argument travels in the query string.
pub fn create_gateway_router(gateway: Gateway) -> Router {
    let router = Router::new()
        .route("/get-detail", get(get_detail))
        .route("/post-detail", get(post_detail).post(post_detail))
        .route("/get-review", get(get_review))
        .route("/post-review", get(post_review).post(post_review))
        .route("/search-reviews", get(search_reviews))
        .route("/get-reservation", get(get_reservation))
        .route("/make-reservation", get(make_reservation).post(make_reservation))
        .route("/health", super::health("gateway"))
        .with_state(gateway);

    super::with_middleware(router)
}
