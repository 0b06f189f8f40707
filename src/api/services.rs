//! Data service handlers: detail, review and reservation.
//!
//! Each router is backed by the trait object of its service, so tests and
//! standalone mode can mount in-process implementations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::models::StatusResponse;
use crate::services::{
    DetailApi, Reservation, ReservationApi, RestaurantDetail, Review, ReviewApi, ReviewCollection,
};

// == Detail ==
async fn get_detail(
    State(api): State<Arc<dyn DetailApi>>,
    Path(restaurant_name): Path<String>,
) -> Result<Json<RestaurantDetail>> {
    Ok(Json(api.get_detail(&restaurant_name).await?))
}

async fn post_detail(
    State(api): State<Arc<dyn DetailApi>>,
    Json(detail): Json<RestaurantDetail>,
) -> Result<Json<StatusResponse>> {
    api.post_detail(detail).await?;
    Ok(Json(StatusResponse::ok()))
}

pub fn create_detail_router(api: Arc<dyn DetailApi>) -> Router {
    let router = Router::new()
        .route("/detail", post(post_detail))
        .route("/detail/:restaurant_name", get(get_detail))
        .route("/health", super::health("detail"))
        .with_state(api);

    super::with_middleware(router)
}

// == Review ==
async fn get_review(
    State(api): State<Arc<dyn ReviewApi>>,
    Path((restaurant_name, user_name)): Path<(String, String)>,
) -> Result<Json<Review>> {
    Ok(Json(api.get_review(&restaurant_name, &user_name).await?))
}

async fn search_reviews(
    State(api): State<Arc<dyn ReviewApi>>,
    Path(restaurant_name): Path<String>,
) -> Result<Json<ReviewCollection>> {
    Ok(Json(api.search_reviews(&restaurant_name).await?))
}

async fn post_review(
    State(api): State<Arc<dyn ReviewApi>>,
    Json(review): Json<Review>,
) -> Result<Json<StatusResponse>> {
    api.post_review(review).await?;
    Ok(Json(StatusResponse::ok()))
}

pub fn create_review_router(api: Arc<dyn ReviewApi>) -> Router {
    let router = Router::new()
        .route("/reviews", post(post_review))
        .route("/reviews/:restaurant_name", get(search_reviews))
        .route("/reviews/:restaurant_name/:user_name", get(get_review))
        .route("/health", super::health("review"))
        .with_state(api);

    super::with_middleware(router)
}

// == Reservation ==
async fn get_reservation(
    State(api): State<Arc<dyn ReservationApi>>,
    Path(user_name): Path<String>,
) -> Result<Json<Reservation>> {
    Ok(Json(api.get_reservation(&user_name).await?))
}

async fn make_reservation(
    State(api): State<Arc<dyn ReservationApi>>,
    Json(reservation): Json<Reservation>,
) -> Result<Json<StatusResponse>> {
    api.make_reservation(reservation).await?;
    Ok(Json(StatusResponse::ok()))
}

pub fn create_reservation_router(api: Arc<dyn ReservationApi>) -> Router {
    let router = Router::new()
        .route("/reservations", post(make_reservation))
        .route("/reservations/:user_name", get(get_reservation))
        .route("/health", super::health("reservation"))
        .with_state(api);

    super::with_middleware(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{get as get_req, json, send};
    use crate::services::testing::backing;
    use crate::services::{DetailService, ReservationService, ReviewService};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_detail_endpoints() {
        let app = create_detail_router(Arc::new(DetailService::new(backing(true).coordinator)));

        let detail = json!({
            "restaurant_name": "Zuni Cafe",
            "location": "Market St",
            "style": "Mediterranean",
            "capacity": 120
        });
        let (status, body) = send(&app, json("POST", "/detail", detail.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": true}));

        // Path segment is percent-decoded back to the stored key
        let (status, body) = send(&app, get_req("/detail/Zuni%20Cafe")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, detail);

        let (status, _) = send(&app, get_req("/detail/Absent")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_review_endpoints() {
        let app = create_review_router(Arc::new(ReviewService::new(backing(true).coordinator)));

        for (user, rating) in [("alice", 5), ("bob", 2)] {
            let review = json!({
                "user_name": user,
                "restaurant_name": "Nopa",
                "review": "ok",
                "rating": rating
            });
            let (status, _) = send(&app, json("POST", "/reviews", review)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, get_req("/reviews/Nopa/bob")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 2);

        let (status, body) = send(&app, get_req("/reviews/Nopa")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reviews"].as_object().unwrap().len(), 2);

        let (status, _) = send(&app, get_req("/reviews/Nopa/carol")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reservation_endpoints() {
        let app = create_reservation_router(Arc::new(ReservationService::new(
            backing(true).coordinator,
        )));

        let reservation = json!({
            "user_name": "alice",
            "restaurant_name": "Nopa",
            "date": {"year": 2024, "month": 12, "day": 24}
        });
        let (status, _) = send(&app, json("POST", "/reservations", reservation.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, get_req("/reservations/alice")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, reservation);
    }

    #[tokio::test]
    async fn test_invalid_service_input_is_bad_request() {
        let app = create_reservation_router(Arc::new(ReservationService::new(
            backing(true).coordinator,
        )));
        let reservation = json!({
            "user_name": "alice",
            "restaurant_name": "",
            "date": {"year": 2024, "month": 5, "day": 1}
        });
        let (status, body) = send(&app, json("POST", "/reservations", reservation)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("restaurant_name cannot be empty"));
    }
}
