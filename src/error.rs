//! Error types for the welp services
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Welp Error Enum ==
/// Unified error type shared by the cache tier, storage tier, data services and gateway.
#[derive(Error, Debug)]
pub enum WelpError {
    /// Key absent from a cache or storage instance. Expected on the read path.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Unknown policy/device/routing name or invalid bound at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Payload could not be encoded or decoded into the expected domain type
    #[error("Serialization failure: {0}")]
    Serialization(String),

    /// Call to a cache, storage or service peer failed
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Malformed client input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WelpError {
    /// True for the expected "key absent" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WelpError::NotFound(_))
    }
}

impl From<serde_json::Error> for WelpError {
    fn from(err: serde_json::Error) -> Self {
        WelpError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for WelpError {
    fn from(err: reqwest::Error) -> Self {
        WelpError::Transport(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for WelpError {
    fn into_response(self) -> Response {
        let status = match &self {
            WelpError::NotFound(_) => StatusCode::NOT_FOUND,
            WelpError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            WelpError::Transport(_) => StatusCode::BAD_GATEWAY,
            WelpError::InvalidConfiguration(_)
            | WelpError::Serialization(_)
            | WelpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the welp crate.
pub type Result<T> = std::result::Result<T, WelpError>;
