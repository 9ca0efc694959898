//! Typed path parameter helpers.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use booking_core::error::AppError;
use booking_core::types::BookingId;

use crate::error::ApiError;

/// Parses a booking ID from a path segment.
pub fn parse_booking_id(s: &str) -> Result<BookingId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid booking id: {s}")))
}

/// The `{id}` segment of a booking route.
#[derive(Debug, Clone, Copy)]
pub struct BookingPath(pub BookingId);

impl<S> FromRequestParts<S> for BookingPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(parse_booking_id(&raw)?))
    }
}
