//! Error types for the room API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Room
//! service failures map onto it by taxonomy: state conflicts become `409`,
//! ownership violations `403`, missing rooms `404`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parlor_rooms::RoomError;

/// Errors that can occur in the room API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with current game or room state.
    #[error("{0}")]
    Conflict(String),

    /// The actor is not allowed to perform this operation.
    #[error("{0}")]
    Forbidden(String),

    /// The request payload failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        match &err {
            RoomError::NotFound(_) => Self::NotFound(err.to_string()),
            RoomError::NotOwner => Self::Forbidden(err.to_string()),
            RoomError::NameTaken | RoomError::Join(_) | RoomError::Move(_) => {
                Self::Conflict(err.to_string())
            }
            RoomError::Storage(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            Self::InvalidRequest(msg) | Self::InvalidUuid(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
