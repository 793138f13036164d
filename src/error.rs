use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::service::PetError;
use crate::store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps service and extraction failures to HTTP status codes and a JSON
/// `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Missing id or name, negative age, or mismatched ids
    InvalidInput(String),
    /// Request body is not valid JSON or has the wrong shape
    InvalidBody(String),
    /// No pet with this id
    PetNotFound(String),
    /// Store operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid pet: {}", msg),
            ),
            ApiError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", msg),
            ),
            ApiError::PetNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Pet not found: {}", id),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Store operation failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {:#}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<PetError> for ApiError {
    fn from(err: PetError) -> Self {
        match err {
            PetError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            PetError::NotFound(id) => ApiError::PetNotFound(id),
            PetError::Store(StoreError::Backend(err)) => ApiError::DatabaseError(err),
            PetError::Store(err) => ApiError::DatabaseError(err.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}
