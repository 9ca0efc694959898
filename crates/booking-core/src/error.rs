//! Unified application error types for the booking service.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Each [`ErrorKind`] is a stable,
//! externally observable failure category so that callers can branch on
//! the kind rather than on message text.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested booking does not exist.
    NotFound,
    /// No acting user identity was supplied.
    Unauthenticated,
    /// The acting user does not own the booking.
    Unauthorized,
    /// The booking's current status does not allow the requested transition.
    InvalidTransition,
    /// The booking's scheduled start time has not been reached.
    TooEarly,
    /// The user service rejected the user.
    InvalidUser,
    /// The vehicle is not available at the requested time.
    VehicleUnavailable,
    /// Input validation failed.
    Validation,
    /// An adjacent service could not be reached or answered unexpectedly.
    ExternalService,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Return the stable machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::TooEarly => "TOO_EARLY",
            Self::InvalidUser => "INVALID_USER",
            Self::VehicleUnavailable => "VEHICLE_UNAVAILABLE",
            Self::Validation => "VALIDATION_ERROR",
            Self::ExternalService => "EXTERNAL_SERVICE",
            Self::Database => "DATABASE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The unified application error used throughout the booking service.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an unauthenticated error.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    /// Create an ownership (unauthorized) error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create an invalid-transition error.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTransition, message)
    }

    /// Create a too-early error.
    pub fn too_early(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TooEarly, message)
    }

    /// Create an invalid-user error.
    pub fn invalid_user(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUser, message)
    }

    /// Create a vehicle-unavailable error.
    pub fn vehicle_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::VehicleUnavailable, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an external-service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether this error was caused by the caller rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotFound
                | ErrorKind::Unauthenticated
                | ErrorKind::Unauthorized
                | ErrorKind::InvalidTransition
                | ErrorKind::TooEarly
                | ErrorKind::InvalidUser
                | ErrorKind::VehicleUnavailable
                | ErrorKind::Validation
        )
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(ErrorKind::Database, format!("Database error: {err}"), err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::with_source(
            ErrorKind::ExternalService,
            format!("Upstream request failed: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = AppError::invalid_transition("cannot start booking with status: pending");
        assert_eq!(
            err.to_string(),
            "INVALID_TRANSITION: cannot start booking with status: pending"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::too_early("not yet").is_client_error());
        assert!(AppError::unauthorized("not yours").is_client_error());
        assert!(!AppError::database("down").is_client_error());
        assert!(!AppError::external_service("timeout").is_client_error());
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("boom");
        let err = AppError::with_source(ErrorKind::Internal, "wrapped", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Internal);
        assert!(cloned.source.is_none());
    }
}
