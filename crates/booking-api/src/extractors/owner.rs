//! `OwnerId` extractor: the acting user from the `X-User-ID` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use booking_core::error::AppError;

use crate::error::ApiError;

/// Header carrying the acting user's identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the user performing an owner-only operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Borrow the user ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::unauthenticated("Missing X-User-ID header"))?;

        Ok(Self(user_id.to_string()))
    }
}
