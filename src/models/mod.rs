//! Request and Response models for the welp HTTP surfaces
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    GetReviewQuery, MakeReservationQuery, PostDetailQuery, PostReviewQuery, RestaurantQuery,
    UserQuery,
};
pub use responses::{
    ErrorResponse, HealthResponse, StatsResponse, StatusResponse, SuccessResponse,
};
