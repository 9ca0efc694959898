//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use booking_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and public error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, kind.code()),
        ErrorKind::Unauthenticated => (StatusCode::UNAUTHORIZED, kind.code()),
        ErrorKind::Unauthorized => (StatusCode::FORBIDDEN, kind.code()),
        ErrorKind::InvalidTransition
        | ErrorKind::TooEarly
        | ErrorKind::InvalidUser
        | ErrorKind::VehicleUnavailable
        | ErrorKind::Validation => (StatusCode::BAD_REQUEST, kind.code()),
        ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, kind.code()),
        ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        let message = if err.is_client_error() {
            tracing::debug!(code = error_code, error = %err.message, "Request rejected");
            err.message
        } else if status == StatusCode::BAD_GATEWAY {
            tracing::warn!(error = %err.message, "Upstream service failure");
            err.message
        } else {
            tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
            "internal server error".to_string()
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
