//! API error types and responses.
//!
//! This module defines the standard error format for all API responses
//! and the mapping from library errors to HTTP statuses. Which errors
//! reach this layer at all is decided below it: create errors propagate,
//! delete-sweep errors never do.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use stratadb_kube::ServiceError;
use stratadb_store::StoreError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request body or parameters.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with existing cluster state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The cluster control plane rejected or failed the request.
    #[error("control plane error: {0}")]
    ControlPlane(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Error details.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ControlPlane(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::ControlPlane(_) => "control_plane_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::Decode(_) => Self::BadRequest(err.to_string()),
            ServiceError::Create { name, .. } if err.is_conflict() => {
                Self::Conflict(format!("service {name} already exists"))
            }
            ServiceError::Create { name, .. } if err.is_not_found() => {
                Self::NotFound(format!("namespace or service {name}"))
            }
            ServiceError::Create { .. } | ServiceError::Delete { .. } if err.is_invalid() => {
                Self::BadRequest(err.to_string())
            }
            ServiceError::Create { .. } | ServiceError::Delete { .. } => {
                tracing::error!(error = %err, "Control plane error");
                Self::ControlPlane(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound("record".to_string()),
            StoreError::Database(_) | StoreError::Serialization(_) => {
                tracing::error!(error = %err, "Store error");
                Self::Internal("storage error".to_string())
            }
        }
    }
}
