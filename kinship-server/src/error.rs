//! Error handling for the Kinship server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kinship::KinshipError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Kinship library error
    #[error("{0}")]
    Kinship(#[from] KinshipError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request error
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Kinship(err) => match err {
                KinshipError::NotFound(_) => StatusCode::NOT_FOUND,
                KinshipError::Forbidden(_) => StatusCode::FORBIDDEN,
                KinshipError::DuplicateEdge(_) => StatusCode::CONFLICT,
                KinshipError::SelfRelationship
                | KinshipError::UnknownRelationType(_)
                | KinshipError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Kinship(err) => match err {
                KinshipError::NotFound(_) => "not_found",
                KinshipError::Forbidden(_) => "forbidden",
                KinshipError::DuplicateEdge(_) => "duplicate_relationship",
                KinshipError::SelfRelationship => "self_relationship",
                KinshipError::UnknownRelationType(_) => "unknown_relation_type",
                KinshipError::Validation(_) => "validation_error",
                _ => "kinship_error",
            },
            ServerError::Auth(_) => "authentication_error",
            ServerError::Validation(_) => "validation_error",
            ServerError::NotFound(_) => "not_found",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
            ServerError::Serialization(_) => "serialization_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a not found error
pub fn not_found(resource: &str, id: &str) -> ServerError {
    ServerError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
